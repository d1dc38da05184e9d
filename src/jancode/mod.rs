//! GTIN-13 ("JAN") code validation and normalization.
//!
//! Pure functions, no I/O. The rest of the crate uses these to vet codes
//! returned by the lookup provider and by the vision model.

pub mod error;


pub use error::JanCodeError;

/// Length of a full GTIN-13 / JAN code.
pub const JAN_CODE_LEN: usize = 13;

/// Returns `true` iff `code` is exactly 13 ASCII digits with a correct
/// GTIN-13 check digit.
pub fn validate(code: &str) -> bool {
    if code.len() != JAN_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u32> = code.bytes().map(|b| u32::from(b - b'0')).collect();
    check_digit(&digits[..12]) == digits[12]
}

/// Computes the GTIN-13 check digit over the first 12 digits.
///
/// Standard weighted mod-10: digits at even indices (0-based) weigh 1,
/// odd indices weigh 3, check digit = (10 - sum mod 10) mod 10.
fn check_digit(body: &[u32]) -> u32 {
    debug_assert_eq!(body.len(), 12);

    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();

    (10 - sum % 10) % 10
}

/// Normalizes `code` to a 13-digit string.
///
/// Strips everything that is not an ASCII digit and left-pads with zeros.
/// Fails when the stripped string is empty or longer than 13 digits.
pub fn format(code: &str) -> Result<String, JanCodeError> {
    let digits: String = code.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() || digits.len() > JAN_CODE_LEN {
        return Err(JanCodeError::InvalidFormat {
            code: code.to_string(),
        });
    }

    Ok(format!("{digits:0>13}"))
}

/// Maps the code's leading GS1 prefix to a country/region label.
///
/// Returns `None` for unassigned prefixes or inputs too short/non-numeric
/// to carry one.
pub fn country_code(code: &str) -> Option<&'static str> {
    if code.len() < 3 || !code.bytes().take(3).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let prefix: u32 = code[..3].parse().ok()?;

    // GS1 prefix ranges (abridged to the commonly assigned blocks).
    let label = match prefix {
        0..=19 | 30..=39 | 60..=139 => "United States / Canada",
        300..=379 => "France",
        380 => "Bulgaria",
        400..=440 => "Germany",
        450..=459 | 490..=499 => "Japan",
        460..=469 => "Russia",
        471 => "Taiwan",
        480 => "Philippines",
        489 => "Hong Kong",
        500..=509 => "United Kingdom",
        520..=521 => "Greece",
        540..=549 => "Belgium / Luxembourg",
        560 => "Portugal",
        570..=579 => "Denmark",
        590 => "Poland",
        599 => "Hungary",
        600..=601 => "South Africa",
        690..=699 => "China",
        700..=709 => "Norway",
        729 => "Israel",
        730..=739 => "Sweden",
        740..=745 => "Central America",
        750 => "Mexico",
        754..=755 => "Canada",
        760..=769 => "Switzerland",
        770..=771 => "Colombia",
        773 => "Uruguay",
        775 => "Peru",
        779 => "Argentina",
        780 => "Chile",
        786 => "Ecuador",
        789..=790 => "Brazil",
        800..=839 => "Italy",
        840..=849 => "Spain",
        850 => "Cuba",
        858 => "Slovakia",
        859 => "Czechia",
        860 => "Serbia",
        867 => "North Korea",
        868..=869 => "Turkey",
        870..=879 => "Netherlands",
        880..=881 => "South Korea",
        885 => "Thailand",
        888 => "Singapore",
        890 => "India",
        893 => "Vietnam",
        896 => "Pakistan",
        899 => "Indonesia",
        900..=919 => "Austria",
        930..=939 => "Australia",
        940..=949 => "New Zealand",
        955 => "Malaysia",
        958 => "Macau",
        _ => return None,
    };

    Some(label)
}
