//! Filter keys and filter groups.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{SeatClass, Train};

/// A key in one filter group.
///
/// Each group has a fixed set of keys. A train passes a group when it is
/// admitted by at least one enabled key.
pub trait FilterKey: Copy + Ord + fmt::Debug + 'static {
    /// Every key in the group, in display order.
    const ALL: &'static [Self];

    /// Whether `train` satisfies this key.
    fn admits(&self, train: &Train) -> bool;
}

/// Named train families, matched against the train name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainType {
    Rajdhani,
    Shatabdi,
    Duronto,
    Tejas,
    Vande,
}

impl TrainType {
    /// Lowercase keyword searched for in the train name.
    pub fn keyword(&self) -> &'static str {
        match self {
            TrainType::Rajdhani => "rajdhani",
            TrainType::Shatabdi => "shatabdi",
            TrainType::Duronto => "duronto",
            TrainType::Tejas => "tejas",
            TrainType::Vande => "vande",
        }
    }
}

impl FilterKey for TrainType {
    const ALL: &'static [Self] = &[
        TrainType::Rajdhani,
        TrainType::Shatabdi,
        TrainType::Duronto,
        TrainType::Tejas,
        TrainType::Vande,
    ];

    fn admits(&self, train: &Train) -> bool {
        train.name.to_lowercase().contains(self.keyword())
    }
}

/// Part of the day in which a train departs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartureWindow {
    /// 04:00 to 11:59
    Morning,
    /// 12:00 to 16:59
    Afternoon,
    /// 17:00 to 20:59
    Evening,
    /// 21:00 to 03:59
    Night,
}

impl DepartureWindow {
    /// Whether a departure in `hour` (0-23) falls in this window.
    pub fn contains_hour(&self, hour: u32) -> bool {
        match self {
            DepartureWindow::Morning => (4..12).contains(&hour),
            DepartureWindow::Afternoon => (12..17).contains(&hour),
            DepartureWindow::Evening => (17..21).contains(&hour),
            DepartureWindow::Night => hour >= 21 || hour < 4,
        }
    }
}

impl FilterKey for DepartureWindow {
    const ALL: &'static [Self] = &[
        DepartureWindow::Morning,
        DepartureWindow::Afternoon,
        DepartureWindow::Evening,
        DepartureWindow::Night,
    ];

    fn admits(&self, train: &Train) -> bool {
        self.contains_hour(train.departure_time.hour())
    }
}

impl FilterKey for SeatClass {
    const ALL: &'static [Self] = &SeatClass::ALL;

    fn admits(&self, train: &Train) -> bool {
        train.is_offered(*self)
    }
}

/// The on/off state of every key in one filter group.
///
/// A group with no key enabled imposes no constraint. Otherwise a train
/// passes if any enabled key admits it.
#[derive(Clone, PartialEq, Eq)]
pub struct FilterGroup<K: FilterKey> {
    enabled: BTreeSet<K>,
}

impl<K: FilterKey> Default for FilterGroup<K> {
    fn default() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }
}

impl<K: FilterKey> FilterGroup<K> {
    /// A group with every key off.
    pub fn new() -> Self {
        Self::default()
    }

    /// A group with exactly `keys` on.
    pub fn with(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            enabled: keys.into_iter().collect(),
        }
    }

    /// Turn a key on or off.
    pub fn set(&mut self, key: K, on: bool) {
        if on {
            self.enabled.insert(key);
        } else {
            self.enabled.remove(&key);
        }
    }

    /// Whether `key` is on.
    pub fn is_enabled(&self, key: K) -> bool {
        self.enabled.contains(&key)
    }

    /// Whether any key is on.
    pub fn is_active(&self) -> bool {
        !self.enabled.is_empty()
    }

    /// Turn every key off.
    pub fn clear(&mut self) {
        self.enabled.clear();
    }

    /// Whether `train` passes this group.
    pub fn admits(&self, train: &Train) -> bool {
        !self.is_active() || self.enabled.iter().any(|key| key.admits(train))
    }

    /// Every key with its on/off state, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (K, bool)> + '_ {
        K::ALL.iter().map(move |key| (*key, self.is_enabled(*key)))
    }
}

impl<K: FilterKey> fmt::Debug for FilterGroup<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.enabled.iter()).finish()
    }
}

impl<K: FilterKey + Serialize> Serialize for FilterGroup<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries())
    }
}

impl<'de, K: FilterKey + DeserializeOwned> Deserialize<'de> for FilterGroup<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<K, bool>::deserialize(deserializer)?;
        Ok(Self::with(
            map.into_iter().filter(|(_, on)| *on).map(|(key, _)| key),
        ))
    }
}
