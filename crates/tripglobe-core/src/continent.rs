// crates/tripglobe-core/src/continent.rs

//! # Continent / Country Classifier
//!
//! Pure lookups over a static reference table of countries. Every function
//! here is total: an unknown or malformed code lands in
//! [`Continent::Unknown`] instead of failing, so one bad travel record never
//! hides a location from the globe.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::text::fold_key;

/// The coarsest grouping key shown on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Oceania,
    /// Sentinel for codes missing from the reference table.
    Unknown,
}

impl Continent {
    /// The six real buckets, in display order.
    pub const ALL: [Continent; 6] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Oceania,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Oceania => "Oceania",
            Continent::Unknown => "Unknown",
        }
    }

    /// Stable lowercase slug used in cluster ids (`continent:north-america`).
    pub fn slug(self) -> &'static str {
        match self {
            Continent::Africa => "africa",
            Continent::Asia => "asia",
            Continent::Europe => "europe",
            Continent::NorthAmerica => "north-america",
            Continent::SouthAmerica => "south-america",
            Continent::Oceania => "oceania",
            Continent::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryInfo {
    pub iso3: &'static str,
    pub iso2: &'static str,
    pub name: &'static str,
    pub continent: Continent,
}

use Continent::{Africa as AF, Asia as AS, Europe as EU, NorthAmerica as NA, Oceania as OC, SouthAmerica as SA};

// (ISO3, ISO2, display name, continent)
#[rustfmt::skip]
static COUNTRIES: &[(&str, &str, &str, Continent)] = &[
    // Africa
    ("DZA", "DZ", "Algeria", AF), ("AGO", "AO", "Angola", AF), ("BEN", "BJ", "Benin", AF),
    ("BWA", "BW", "Botswana", AF), ("BFA", "BF", "Burkina Faso", AF), ("BDI", "BI", "Burundi", AF),
    ("CPV", "CV", "Cabo Verde", AF), ("CMR", "CM", "Cameroon", AF), ("CAF", "CF", "Central African Republic", AF),
    ("TCD", "TD", "Chad", AF), ("COM", "KM", "Comoros", AF), ("COG", "CG", "Congo", AF),
    ("COD", "CD", "DR Congo", AF), ("CIV", "CI", "Côte d'Ivoire", AF), ("DJI", "DJ", "Djibouti", AF),
    ("EGY", "EG", "Egypt", AF), ("GNQ", "GQ", "Equatorial Guinea", AF), ("ERI", "ER", "Eritrea", AF),
    ("SWZ", "SZ", "Eswatini", AF), ("ETH", "ET", "Ethiopia", AF), ("GAB", "GA", "Gabon", AF),
    ("GMB", "GM", "Gambia", AF), ("GHA", "GH", "Ghana", AF), ("GIN", "GN", "Guinea", AF),
    ("GNB", "GW", "Guinea-Bissau", AF), ("KEN", "KE", "Kenya", AF), ("LSO", "LS", "Lesotho", AF),
    ("LBR", "LR", "Liberia", AF), ("LBY", "LY", "Libya", AF), ("MDG", "MG", "Madagascar", AF),
    ("MWI", "MW", "Malawi", AF), ("MLI", "ML", "Mali", AF), ("MRT", "MR", "Mauritania", AF),
    ("MUS", "MU", "Mauritius", AF), ("MAR", "MA", "Morocco", AF), ("MOZ", "MZ", "Mozambique", AF),
    ("NAM", "NA", "Namibia", AF), ("NER", "NE", "Niger", AF), ("NGA", "NG", "Nigeria", AF),
    ("RWA", "RW", "Rwanda", AF), ("STP", "ST", "São Tomé and Príncipe", AF), ("SEN", "SN", "Senegal", AF),
    ("SYC", "SC", "Seychelles", AF), ("SLE", "SL", "Sierra Leone", AF), ("SOM", "SO", "Somalia", AF),
    ("ZAF", "ZA", "South Africa", AF), ("SSD", "SS", "South Sudan", AF), ("SDN", "SD", "Sudan", AF),
    ("TZA", "TZ", "Tanzania", AF), ("TGO", "TG", "Togo", AF), ("TUN", "TN", "Tunisia", AF),
    ("UGA", "UG", "Uganda", AF), ("ZMB", "ZM", "Zambia", AF), ("ZWE", "ZW", "Zimbabwe", AF),
    ("REU", "RE", "Réunion", AF), ("ESH", "EH", "Western Sahara", AF),
    // Asia
    ("AFG", "AF", "Afghanistan", AS), ("ARM", "AM", "Armenia", AS), ("AZE", "AZ", "Azerbaijan", AS),
    ("BHR", "BH", "Bahrain", AS), ("BGD", "BD", "Bangladesh", AS), ("BTN", "BT", "Bhutan", AS),
    ("BRN", "BN", "Brunei", AS), ("KHM", "KH", "Cambodia", AS), ("CHN", "CN", "China", AS),
    ("GEO", "GE", "Georgia", AS), ("HKG", "HK", "Hong Kong", AS), ("IND", "IN", "India", AS),
    ("IDN", "ID", "Indonesia", AS), ("IRN", "IR", "Iran", AS), ("IRQ", "IQ", "Iraq", AS),
    ("ISR", "IL", "Israel", AS), ("JPN", "JP", "Japan", AS), ("JOR", "JO", "Jordan", AS),
    ("KAZ", "KZ", "Kazakhstan", AS), ("KWT", "KW", "Kuwait", AS), ("KGZ", "KG", "Kyrgyzstan", AS),
    ("LAO", "LA", "Laos", AS), ("LBN", "LB", "Lebanon", AS), ("MAC", "MO", "Macao", AS),
    ("MYS", "MY", "Malaysia", AS), ("MDV", "MV", "Maldives", AS), ("MNG", "MN", "Mongolia", AS),
    ("MMR", "MM", "Myanmar", AS), ("NPL", "NP", "Nepal", AS), ("PRK", "KP", "North Korea", AS),
    ("OMN", "OM", "Oman", AS), ("PAK", "PK", "Pakistan", AS), ("PSE", "PS", "Palestine", AS),
    ("PHL", "PH", "Philippines", AS), ("QAT", "QA", "Qatar", AS), ("SAU", "SA", "Saudi Arabia", AS),
    ("SGP", "SG", "Singapore", AS), ("KOR", "KR", "South Korea", AS), ("LKA", "LK", "Sri Lanka", AS),
    ("SYR", "SY", "Syria", AS), ("TWN", "TW", "Taiwan", AS), ("TJK", "TJ", "Tajikistan", AS),
    ("THA", "TH", "Thailand", AS), ("TLS", "TL", "Timor-Leste", AS), ("TUR", "TR", "Türkiye", AS),
    ("TKM", "TM", "Turkmenistan", AS), ("ARE", "AE", "United Arab Emirates", AS), ("UZB", "UZ", "Uzbekistan", AS),
    ("VNM", "VN", "Vietnam", AS), ("YEM", "YE", "Yemen", AS),
    // Europe
    ("ALB", "AL", "Albania", EU), ("AND", "AD", "Andorra", EU), ("AUT", "AT", "Austria", EU),
    ("BLR", "BY", "Belarus", EU), ("BEL", "BE", "Belgium", EU), ("BIH", "BA", "Bosnia and Herzegovina", EU),
    ("BGR", "BG", "Bulgaria", EU), ("HRV", "HR", "Croatia", EU), ("CYP", "CY", "Cyprus", EU),
    ("CZE", "CZ", "Czechia", EU), ("DNK", "DK", "Denmark", EU), ("EST", "EE", "Estonia", EU),
    ("FRO", "FO", "Faroe Islands", EU), ("FIN", "FI", "Finland", EU), ("FRA", "FR", "France", EU),
    ("DEU", "DE", "Germany", EU), ("GIB", "GI", "Gibraltar", EU), ("GRC", "GR", "Greece", EU),
    ("HUN", "HU", "Hungary", EU), ("ISL", "IS", "Iceland", EU), ("IRL", "IE", "Ireland", EU),
    ("ITA", "IT", "Italy", EU), ("XKX", "XK", "Kosovo", EU), ("LVA", "LV", "Latvia", EU),
    ("LIE", "LI", "Liechtenstein", EU), ("LTU", "LT", "Lithuania", EU), ("LUX", "LU", "Luxembourg", EU),
    ("MLT", "MT", "Malta", EU), ("MDA", "MD", "Moldova", EU), ("MCO", "MC", "Monaco", EU),
    ("MNE", "ME", "Montenegro", EU), ("NLD", "NL", "Netherlands", EU), ("MKD", "MK", "North Macedonia", EU),
    ("NOR", "NO", "Norway", EU), ("POL", "PL", "Poland", EU), ("PRT", "PT", "Portugal", EU),
    ("ROU", "RO", "Romania", EU), ("RUS", "RU", "Russia", EU), ("SMR", "SM", "San Marino", EU),
    ("SRB", "RS", "Serbia", EU), ("SVK", "SK", "Slovakia", EU), ("SVN", "SI", "Slovenia", EU),
    ("ESP", "ES", "Spain", EU), ("SWE", "SE", "Sweden", EU), ("CHE", "CH", "Switzerland", EU),
    ("UKR", "UA", "Ukraine", EU), ("GBR", "GB", "United Kingdom", EU), ("VAT", "VA", "Vatican City", EU),
    // North America (incl. Central America and the Caribbean)
    ("ATG", "AG", "Antigua and Barbuda", NA), ("BHS", "BS", "Bahamas", NA), ("BRB", "BB", "Barbados", NA),
    ("BLZ", "BZ", "Belize", NA), ("BMU", "BM", "Bermuda", NA), ("CAN", "CA", "Canada", NA),
    ("CRI", "CR", "Costa Rica", NA), ("CUB", "CU", "Cuba", NA), ("DMA", "DM", "Dominica", NA),
    ("DOM", "DO", "Dominican Republic", NA), ("SLV", "SV", "El Salvador", NA), ("GRL", "GL", "Greenland", NA),
    ("GRD", "GD", "Grenada", NA), ("GTM", "GT", "Guatemala", NA), ("HTI", "HT", "Haiti", NA),
    ("HND", "HN", "Honduras", NA), ("JAM", "JM", "Jamaica", NA), ("MEX", "MX", "Mexico", NA),
    ("NIC", "NI", "Nicaragua", NA), ("PAN", "PA", "Panama", NA), ("PRI", "PR", "Puerto Rico", NA),
    ("KNA", "KN", "Saint Kitts and Nevis", NA), ("LCA", "LC", "Saint Lucia", NA),
    ("VCT", "VC", "Saint Vincent and the Grenadines", NA), ("TTO", "TT", "Trinidad and Tobago", NA),
    ("USA", "US", "United States", NA),
    // South America
    ("ARG", "AR", "Argentina", SA), ("BOL", "BO", "Bolivia", SA), ("BRA", "BR", "Brazil", SA),
    ("CHL", "CL", "Chile", SA), ("COL", "CO", "Colombia", SA), ("ECU", "EC", "Ecuador", SA),
    ("GUF", "GF", "French Guiana", SA), ("GUY", "GY", "Guyana", SA), ("PRY", "PY", "Paraguay", SA),
    ("PER", "PE", "Peru", SA), ("SUR", "SR", "Suriname", SA), ("URY", "UY", "Uruguay", SA),
    ("VEN", "VE", "Venezuela", SA),
    // Oceania
    ("AUS", "AU", "Australia", OC), ("FJI", "FJ", "Fiji", OC), ("PYF", "PF", "French Polynesia", OC),
    ("GUM", "GU", "Guam", OC), ("KIR", "KI", "Kiribati", OC), ("MHL", "MH", "Marshall Islands", OC),
    ("FSM", "FM", "Micronesia", OC), ("NRU", "NR", "Nauru", OC), ("NCL", "NC", "New Caledonia", OC),
    ("NZL", "NZ", "New Zealand", OC), ("PLW", "PW", "Palau", OC), ("PNG", "PG", "Papua New Guinea", OC),
    ("WSM", "WS", "Samoa", OC), ("SLB", "SB", "Solomon Islands", OC), ("TON", "TO", "Tonga", OC),
    ("TUV", "TV", "Tuvalu", OC), ("VUT", "VU", "Vanuatu", OC),
];

/// Index over [`COUNTRIES`] keyed by upper-case ISO3 *and* ISO2.
static CODE_INDEX: Lazy<HashMap<&'static str, CountryInfo>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(COUNTRIES.len() * 2);
    for &(iso3, iso2, name, continent) in COUNTRIES {
        let info = CountryInfo {
            iso3,
            iso2,
            name,
            continent,
        };
        map.insert(iso3, info);
        map.insert(iso2, info);
    }
    map
});

/// Index keyed by folded country name (`"cote d'ivoire"` -> CIV).
static NAME_INDEX: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    COUNTRIES
        .iter()
        .map(|&(iso3, _, name, _)| (fold_key(name), iso3))
        .collect()
});

/// Find the reference row for an ISO3 or ISO2 code (case-insensitive).
pub fn lookup(code: &str) -> Option<CountryInfo> {
    let code = code.trim();
    if code.is_empty() || !code.is_ascii() {
        return None;
    }
    CODE_INDEX.get(code.to_ascii_uppercase().as_str()).copied()
}

/// Map a country code to its continent bucket.
///
/// Unknown codes return [`Continent::Unknown`]; the location is still
/// clustered, just under the sentinel bucket.
pub fn classify(code: &str) -> Continent {
    lookup(code).map_or(Continent::Unknown, |c| c.continent)
}

/// Human-readable country name, falling back to the upper-cased code.
pub fn country_name(code: &str) -> String {
    match lookup(code) {
        Some(info) => info.name.to_string(),
        None => {
            let trimmed = code.trim();
            if trimmed.is_empty() {
                Continent::Unknown.name().to_string()
            } else {
                trimmed.to_uppercase()
            }
        }
    }
}

/// Normalized grouping key for a country code.
///
/// Known codes (ISO2 or ISO3) map to their ISO3 form so `"jp"` and `"JPN"`
/// land in the same cluster; unknown codes are trimmed and upper-cased.
pub fn canonical_code(code: &str) -> String {
    match lookup(code) {
        Some(info) => info.iso3.to_string(),
        None => code.trim().to_uppercase(),
    }
}

/// `true` when every code classifies into the same bucket.
///
/// Vacuously `true` for an empty set.
pub fn same_continent<'a, I>(codes: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut iter = codes.into_iter().map(classify);
    match iter.next() {
        Some(first) => iter.all(|c| c == first),
        None => true,
    }
}

/// Flag emoji built from the ISO2 code's regional indicator symbols.
pub fn country_flag(code: &str) -> Option<String> {
    let info = lookup(code)?;
    info.iso2
        .chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Accent- and case-insensitive lookup of an ISO3 code by country name.
///
/// ```rust
/// use tripglobe_core::continent::find_code_by_name;
///
/// assert_eq!(find_code_by_name("cote d'ivoire"), Some("CIV"));
/// assert_eq!(find_code_by_name("TÜRKIYE"), Some("TUR"));
/// ```
pub fn find_code_by_name(name: &str) -> Option<&'static str> {
    NAME_INDEX.get(&fold_key(name.trim())).copied()
}
