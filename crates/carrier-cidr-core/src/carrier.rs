//! Carrier identifiers and the bijective short-name registry
//!
//! Every tracked carrier has a stable short name that doubles as its
//! snapshot file name and its key in output bundles. The registry is built
//! once from a fixed table and refuses tables that are not a total bijection.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Mobile network carriers whose gateway ranges are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CarrierId {
    /// NTT docomo (i-mode)
    DoCoMo,
    /// au by KDDI (EZweb)
    EZWeb,
    /// WILLCOM (AIR-EDGE PHONE)
    AirHPhone,
    /// SoftBank Mobile (formerly Vodafone / J-PHONE)
    ThirdForce,
}

impl CarrierId {
    /// Every carrier in the closed set, in declaration order
    pub const ALL: [CarrierId; 4] = [
        CarrierId::DoCoMo,
        CarrierId::EZWeb,
        CarrierId::AirHPhone,
        CarrierId::ThirdForce,
    ];

    /// Identifier spelling used in logs and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierId::DoCoMo => "DoCoMo",
            CarrierId::EZWeb => "EZWeb",
            CarrierId::AirHPhone => "AirHPhone",
            CarrierId::ThirdForce => "ThirdForce",
        }
    }
}

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarrierId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CarrierId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::unknown_carrier(s))
    }
}

/// Carriers processed by the update pipeline unless configured otherwise.
///
/// `AirHPhone` is registered but deliberately not scraped by default.
pub const DEFAULT_ACTIVE_CARRIERS: [CarrierId; 3] =
    [CarrierId::DoCoMo, CarrierId::EZWeb, CarrierId::ThirdForce];

/// The built-in id -> short name table
const CARRIER_TABLE: &[(CarrierId, &str)] = &[
    (CarrierId::DoCoMo, "docomo"),
    (CarrierId::EZWeb, "ezweb"),
    (CarrierId::AirHPhone, "willcom"),
    (CarrierId::ThirdForce, "softbank"),
];

/// Bijective mapping between carrier ids and their short names
///
/// Both lookup directions are derived from a single table, so they can
/// never disagree.
#[derive(Debug, Clone)]
pub struct CarrierRegistry {
    by_id: BTreeMap<CarrierId, &'static str>,
    by_name: BTreeMap<&'static str, CarrierId>,
}

impl CarrierRegistry {
    /// Build the registry from the built-in carrier table
    ///
    /// # Panics
    ///
    /// Panics if the built-in table is not a total bijection.
    pub fn new() -> Self {
        match Self::from_table(CARRIER_TABLE) {
            Ok(registry) => registry,
            Err(e) => panic!("built-in carrier table is invalid: {}", e),
        }
    }

    /// Build a registry from an explicit table
    ///
    /// Fails with `Error::Config` if an id or a short name appears twice,
    /// a short name is empty, or any carrier is missing from the table.
    pub fn from_table(table: &[(CarrierId, &'static str)]) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        let mut by_name = BTreeMap::new();

        for &(id, name) in table {
            if name.is_empty() {
                return Err(Error::config(format!("Empty short name for carrier {}", id)));
            }
            if by_id.insert(id, name).is_some() {
                return Err(Error::config(format!("Duplicate carrier id in table: {}", id)));
            }
            if by_name.insert(name, id).is_some() {
                return Err(Error::config(format!(
                    "Duplicate carrier short name in table: {}",
                    name
                )));
            }
        }

        if let Some(missing) = CarrierId::ALL.iter().find(|id| !by_id.contains_key(*id)) {
            return Err(Error::config(format!("Carrier table has no short name for {}", missing)));
        }

        Ok(Self { by_id, by_name })
    }

    /// Short name (snapshot file name) for a carrier
    pub fn short_name_of(&self, id: CarrierId) -> Result<&'static str> {
        self.by_id
            .get(&id)
            .copied()
            .ok_or_else(|| Error::unknown_carrier(id.as_str()))
    }

    /// Carrier for a short name
    pub fn carrier_id_of(&self, short_name: &str) -> Result<CarrierId> {
        self.by_name
            .get(short_name)
            .copied()
            .ok_or_else(|| Error::unknown_carrier(short_name))
    }

    /// Iterate `(id, short_name)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (CarrierId, &'static str)> + '_ {
        self.by_id.iter().map(|(id, name)| (*id, *name))
    }
}

impl Default for CarrierRegistry {
    fn default() -> Self {
        Self::new()
    }
}
