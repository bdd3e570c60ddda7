//! Projection zones and the county-prefix classifier.
//!
//! Poland's PUWG 2000 grid is split into four 3° zones. Every county
//! (TERYT `WWPP` code) lies in exactly one of them, so the first four
//! characters of a parcel identifier select the zone.

use crate::parcel::identifier::ParcelId;
use crate::projection::crs::Crs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// PUWG 2000 zone (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Zone5,
    Zone6,
    Zone7,
    Zone8,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Zone5, Zone::Zone6, Zone::Zone7, Zone::Zone8];

    /// Coordinate reference system bound to this zone.
    pub fn crs(&self) -> Crs {
        match self {
            Zone::Zone5 => Crs::Puwg2000Zone5,
            Zone::Zone6 => Crs::Puwg2000Zone6,
            Zone::Zone7 => Crs::Puwg2000Zone7,
            Zone::Zone8 => Crs::Puwg2000Zone8,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Zone::Zone5 => 5,
            Zone::Zone6 => 6,
            Zone::Zone7 => 7,
            Zone::Zone8 => 8,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zone {} ({})", self.number(), self.crs())
    }
}

const ZONE_5_PREFIXES: &[&str] = &[
    "3263", "3207", "3205", "3208", "3209", "3261", "3211", "3204", "3218", "3216", "3201", "3262",
    "3214", "3203", "3206", "3212", "3202", "3217", "3210", "0806", "3002", "0801", "0861", "0805",
    "0807", "0803", "3014", "3024", "0808", "3015", "0802", "0809", "0862", "3029", "3005", "0811",
    "0810", "0804", "0812", "0203", "0225", "0201", "0216", "0211", "0210", "0212", "0226", "0209",
    "0262", "0205", "0206", "0261", "0207", "0221", "0265", "0219",
];

const ZONE_6_PREFIXES: &[&str] = &[
    "3213", "2212", "2263", "2208", "2215", "2211", "2201", "2205", "2262", "2264", "2261", "2210",
    "3215", "2203", "2202", "2206", "2204", "2213", "2214", "2209", "2216", "3031", "0413", "0416",
    "0414", "2207", "0406", "0462", "3019", "0410", "0403", "0461", "0404", "0417", "0402", "3001",
    "3028", "0419", "0407", "0415", "0463", "0405", "0412", "0408", "0464", "0401", "0411", "0418",
    "3016", "3021", "3064", "3003", "0409", "3025", "3030", "3023", "3010", "3062", "3009", "1002",
    "3011", "3026", "3006", "3020", "3007", "3027", "1004", "1011", "1020", "3013", "3063", "3004",
    "3012", "3017", "3061", "1014", "1019", "1003", "1008", "1061", "0204", "3022", "0213", "0222",
    "0220", "0214", "3018", "3008", "1018", "1017", "1001", "1009", "0218", "0264", "0223", "0215",
    "1606", "1604", "1608", "2406", "2404", "2464", "0202", "0217", "1601", "1609", "1661", "1611",
    "2407", "2409", "0208", "0224", "1607", "1610", "1605", "1603", "1602", "2411", "2415", "2405",
    "2466", "2413", "2478", "2462", "2471", "2401", "2465", "2475", "2468", "2470", "1203", "2472",
    "2476", "2463", "2474", "2469", "2408", "2477", "2414", "1213", "2402", "2410", "2461", "2403",
    "2417", "2467", "2412", "2479", "2473",
];

const ZONE_7_PREFIXES: &[&str] = &[
    "2802", "2801", "2808", "2819", "2818", "2804", "2861", "2809", "2806", "2813", "2807", "2815",
    "2814", "2862", "2810", "2816", "2805", "2812", "2803", "2811", "2817", "2006", "2004", "1437",
    "1413", "1422", "1415", "1461", "2007", "2062", "1427", "1402", "1411", "2014", "1419", "1462",
    "1420", "1424", "1435", "1416", "1433", "1429", "1404", "1428", "1414", "1432", "1408", "1465",
    "1434", "1412", "1426", "1464", "1005", "1438", "1405", "1421", "1418", "1417", "1021", "1015",
    "1063", "1013", "1406", "1403", "0611", "1006", "1016", "1401", "1407", "0616", "1010", "1062",
    "1007", "1423", "1425", "1463", "1436", "0614", "1012", "2605", "1430", "2610", "2611", "1409",
    "0612", "2613", "2604", "2661", "2607", "2606", "0607", "2416", "2602", "2608", "2601", "2612",
    "2609", "1864", "1820", "1818", "0605", "1812", "1212", "1208", "2603", "1204", "1811", "1806",
    "1808", "1206", "1214", "1261", "1219", "1201", "1202", "1216", "1263", "1803", "1815", "1816",
    "1863", "1810", "1218", "1209", "1207", "1210", "1262", "1205", "1805", "1819", "1807", "1861",
    "1802", "1817", "1821", "1215", "1211", "1217",
];

const ZONE_8_PREFIXES: &[&str] = &[
    "2012", "2063", "2009", "2001", "2008", "2011", "2002", "2061", "2013", "2003", "2005", "2010",
    "1410", "0601", "0661", "0615", "0613", "0619", "0608", "0609", "0663", "0610", "0603", "0662",
    "0617", "0606", "0602", "0620", "0664", "0604", "0618", "1809", "1814", "1804", "1813", "1862",
    "1801",
];

/// Error building a [`ZoneTable`] from overlapping prefix sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Prefix {prefix} is assigned to both {first} and {second}")]
pub struct OverlappingPrefix {
    pub prefix: String,
    pub first: Zone,
    pub second: Zone,
}

/// Immutable prefix → zone lookup table.
///
/// Built once and shared read-only; tests can inject a custom table.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    prefixes: HashMap<String, Zone>,
}

impl ZoneTable {
    /// The national table of county prefixes.
    pub fn standard() -> Self {
        let sets = [
            (Zone::Zone5, ZONE_5_PREFIXES),
            (Zone::Zone6, ZONE_6_PREFIXES),
            (Zone::Zone7, ZONE_7_PREFIXES),
            (Zone::Zone8, ZONE_8_PREFIXES),
        ];
        let prefixes = sets
            .iter()
            .flat_map(|(zone, set)| set.iter().map(move |p| (p.to_string(), *zone)))
            .collect();
        Self { prefixes }
    }

    /// Build a table from per-zone prefix sets, rejecting overlaps.
    pub fn from_sets<I, S>(sets: I) -> Result<Self, OverlappingPrefix>
    where
        I: IntoIterator<Item = (Zone, S)>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let mut prefixes = HashMap::new();
        for (zone, set) in sets {
            for prefix in set {
                let prefix = prefix.as_ref().to_string();
                if let Some(&existing) = prefixes.get(&prefix)
                    && existing != zone
                {
                    return Err(OverlappingPrefix {
                        prefix,
                        first: existing,
                        second: zone,
                    });
                }
                prefixes.insert(prefix, zone);
            }
        }
        Ok(Self { prefixes })
    }

    /// Classify a parcel by its county prefix.
    ///
    /// Returns `None` (unknown zone) when the prefix is in no set.
    pub fn classify(&self, id: &ParcelId) -> Option<Zone> {
        id.zone_prefix()
            .and_then(|prefix| self.prefixes.get(prefix).copied())
    }

    /// Prefixes registered for one zone, sorted.
    pub fn prefixes_of(&self, zone: Zone) -> Vec<&str> {
        let mut prefixes: Vec<&str> = self
            .prefixes
            .iter()
            .filter(|(_, z)| **z == zone)
            .map(|(p, _)| p.as_str())
            .collect();
        prefixes.sort_unstable();
        prefixes
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::standard()
    }
}
