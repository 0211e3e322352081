// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use jiff::Timestamp;

#[derive(Debug)]
pub enum Clock {
    DefaultClock,
    #[cfg(test)]
    ManualClock(ManualClock),
}

impl Clock {
    pub fn now(&self) -> Timestamp {
        match self {
            Clock::DefaultClock => Timestamp::now(),
            #[cfg(test)]
            Clock::ManualClock(clock) => clock.now(),
        }
    }

    /// Milliseconds since the Unix epoch.
    pub fn now_millis(&self) -> i64 {
        self.now().as_millisecond()
    }
}

/// A clock whose time only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
#[cfg(test)]
pub struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<Timestamp>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now: Timestamp) -> ManualClock {
        ManualClock {
            now: std::sync::Arc::new(std::sync::Mutex::new(now)),
        }
    }

    pub fn from_millis(ms: i64) -> ManualClock {
        ManualClock::new(Timestamp::from_millisecond(ms).unwrap())
    }

    pub fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }

    pub fn set_now(&self, now: Timestamp) {
        *self.now.lock().unwrap() = now;
    }

    pub fn set_millis(&self, ms: i64) {
        self.set_now(Timestamp::from_millisecond(ms).unwrap());
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_manual_clock_adjusting() {
        let now = Timestamp::from_str("2023-01-01T12:00:00Z").unwrap();
        let clock = ManualClock::new(now);
        assert_eq!(clock.now(), now);

        let shared = Clock::ManualClock(clock.clone());
        let now = Timestamp::from_str("2024-01-01T12:00:00Z").unwrap();
        clock.set_now(now);
        assert_eq!(shared.now(), now);

        clock.set_millis(200);
        assert_eq!(shared.now_millis(), 200);
    }
}
