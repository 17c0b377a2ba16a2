//! Curated corrections for intersections that failed to geocode
//!
//! Most of these come from San Francisco's street grid breaking at Market St,
//! where the same road changes name from one side to the other, or from
//! intersections entered with streets that never actually meet. Each position
//! was looked up by hand; some are best guesses.

use std::collections::HashMap;

/// Corrected position for one intersection address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressCorrection {
    pub address: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl AddressCorrection {
    pub const fn new(address: &'static str, latitude: f64, longitude: f64) -> Self {
        Self {
            address,
            latitude,
            longitude,
        }
    }
}

/// Table order matters only for duplicate addresses, where the later entry wins.
pub static ADDRESS_CORRECTIONS: &[AddressCorrection] = &[
    AddressCorrection::new("7THSTNORTH ST / MCALLISTER ST", 37.781002, -122.413187),
    AddressCorrection::new("GEARY BL / AVENUE OF THE PALMS", 37.781391, -122.457743),
    AddressCorrection::new("EDDY ST / 5THSTNORTH ST", 37.784466, -122.408574),
    AddressCorrection::new("MCALLISTER ST / 7THSTNORTH ST", 37.781002, -122.413187),
    AddressCorrection::new("FRONT ST / THE EMBARCADERONORTH ST", 37.801544, -122.400441),
    AddressCorrection::new("OFARRELL ST / 5THSTNORTH ST", 37.786336, -122.408949),
    AddressCorrection::new("5TH ST / 5THSTNORTH ST", 37.784010, -122.408097),
    AddressCorrection::new("STJOSEPHS AV / TERRAVISTA AV", 37.781236, -122.441349),
    AddressCorrection::new("AUSTIN ST / LARKIN ST", 37.789378, -122.418782),
    AddressCorrection::new("ELLIS ST / 5THSTNORTH ST", 37.785413, -122.408753),
    AddressCorrection::new("5THSTNORTH ST / EDDY ST", 37.784466, -122.408574),
    AddressCorrection::new("JENNINGS CT / PHELPS ST", 37.717177, -122.397460),
    AddressCorrection::new("INTERSTATE280 HY / GENEVA AV", 37.721288, -122.448127),
    AddressCorrection::new("ELLICK LN / CALIFORNIA ST", 37.793165, -122.400530),
    AddressCorrection::new("BUSH ST / STGEORGE AL", 37.790727, -122.404352),
    AddressCorrection::new("INTERSTATE280 HY / OCEAN AV", 37.722981, -122.447773),
    AddressCorrection::new("SPEAR ST / THE EMBARCADEROSOUTH ST", 37.787690, -122.387976),
    AddressCorrection::new("BRANNAN ST / 1ST ST", 37.783652, -122.389865),
    AddressCorrection::new("ARGUELLO BL / NORTHRIDGE DR", 37.773227, -122.459070),
    AddressCorrection::new("17TH ST / COLLINGWOOD ST", 37.762138, -122.436218),
    AddressCorrection::new("JEWETT ST / 5TH ST", 37.784005, -122.408090),
    AddressCorrection::new("JAMES LICK FREEWAY HY / CESAR CHAVEZ ST", 37.749387, -122.403732),
    AddressCorrection::new("I-280 / CESAR CHAVEZ ST", 37.750103, -122.391998),
    AddressCorrection::new("JAMES LICK FREEWAY HY / 4TH ST", 37.780262, -122.398896),
    AddressCorrection::new("JAMES LICK FREEWAY HY / SILVER AV", 37.732664, -122.405247),
    AddressCorrection::new("1ST ST / BRYANT ST", 37.784950, -122.391289),
    AddressCorrection::new("LARKIN ST / AUSTIN ST", 37.789378, -122.418782),
    AddressCorrection::new("JOHN F KENNEDY DR / CROSSOVER DR", 37.770716, -122.479205),
    AddressCorrection::new("EUCLID AV / AVENUE OF THE PALMS", 37.783870, -122.457922),
    AddressCorrection::new("GILMAN AV / FITCH ST", 37.717177, -122.386260),
    AddressCorrection::new("1ST ST / BRANNAN ST", 37.783652, -122.389865),
    AddressCorrection::new("JAMES LICK FREEWAY HY / BAY SHORE BL", 37.715933, -122.398576),
    AddressCorrection::new("SPEAR ST / THE EMBARCADERO SOUTH ST", 37.787690, -122.387976),
    AddressCorrection::new("LOWER GREAT HY / MARTIN LUTHER KING JR DR", 37.764097, -122.509411),
    AddressCorrection::new("5THSTNORTH ST / OFARRELL ST", 37.786336, -122.408949),
    AddressCorrection::new("JAMESLICKFREEWAY HY / SILVER AV", 37.732664, -122.405247),
    AddressCorrection::new("5THSTNORTH ST / ELLIS ST", 37.785413, -122.408753),
    AddressCorrection::new("YOSEMITE AV / WILLIAMS AV", 37.729587, -122.394912),
    AddressCorrection::new("BRENHAM PL / WASHINGTON ST", 37.793917, -122.416326),
    AddressCorrection::new("AVENUE OF THE PALMS / GEARY BL", 37.781391, -122.457743),
    AddressCorrection::new("STCHARLES AV / 19TH AV", 37.713785, -122.469331),
    AddressCorrection::new("TURK ST / STJOSEPHS AV", 37.779396, -122.440936),
    AddressCorrection::new("MONTGOMERY ST / THE EMBARCADERONORTH ST", 37.806569, -122.405870),
    AddressCorrection::new("FITCH ST / DONNER AV", 37.719108, -122.384525),
    AddressCorrection::new("AVENUE OF THE PALMS / EUCLID AV", 37.783870, -122.457922),
    AddressCorrection::new("VANNESS AV / BEACH ST", 37.806036, -122.425514),
    AddressCorrection::new("PERSIA AV / LAGRANDE AV", 37.718562, -122.426440),
    AddressCorrection::new("3RD ST / ISLAISCREEK ST", 37.747707, -122.387248),
    AddressCorrection::new("JENNINGS CT / INGALLS ST", 37.734113, -122.379523),
    AddressCorrection::new("GENEVA AV / INTERSTATE280 HY", 37.721288, -122.448127),
    AddressCorrection::new("CHARLES J BRENHAM PL / CLAY ST", 37.793043, -122.416116),
    AddressCorrection::new("STELMO WY / MONTEREY BL", 37.730460, -122.460551),
    AddressCorrection::new("I-280 / PENNSYLVANIA AV", 37.757690, -122.392347),
    AddressCorrection::new("FLORIDA ST / ALAMEDA ST", 37.768121, -122.411724),
    AddressCorrection::new("BRYANT ST / SPEAR ST", 37.787690, -122.387976),
    AddressCorrection::new("PERSIA AV / LA GRANDE AV", 37.718562, -122.426440),
    AddressCorrection::new("GREENWICH ST / THE EMBARCADERO NORTH ST", 37.803124, -122.401270),
    AddressCorrection::new("JOHN F KENNEDY DR / MARTIN LUTHER KING JR DR", 37.766686, -122.506270),
    AddressCorrection::new("3RD ST / JAMES LICK FREEWAY HY", 37.781978, -122.396687),
];

/// Address-indexed view over an ordered list of corrections.
#[derive(Debug, Clone)]
pub struct CorrectionTable {
    entries: Vec<AddressCorrection>,
    index: HashMap<&'static str, usize>,
}

impl CorrectionTable {
    /// Build from corrections in priority order (later duplicates override earlier ones).
    pub fn new(entries: &[AddressCorrection]) -> Self {
        let entries = entries.to_vec();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.address, i))
            .collect();
        Self { entries, index }
    }

    /// The curated San Francisco table.
    pub fn curated() -> Self {
        Self::new(ADDRESS_CORRECTIONS)
    }

    pub fn lookup(&self, address: &str) -> Option<&AddressCorrection> {
        self.index.get(address).map(|&i| &self.entries[i])
    }

    /// Number of distinct addresses that can be corrected.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &AddressCorrection> {
        self.entries.iter()
    }
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::curated()
    }
}
