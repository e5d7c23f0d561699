//! Phone input adapter
//!
//! Keeps the tel field digit-only and answers region-aware validity
//! questions for the validator.

use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

/// Maximum national number length enforced while typing for India
pub const INDIA_MAX_DIGITS: usize = 10;

/// Dialling region selectable next to the phone field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    #[serde(rename = "in")]
    India,
    #[serde(rename = "us")]
    UnitedStates,
    #[serde(rename = "gb")]
    UnitedKingdom,
}

impl Region {
    /// Preferred regions in selector order
    pub const PREFERRED: [Region; 3] = [Region::India, Region::UnitedStates, Region::UnitedKingdom];

    /// Next region in selector order, wrapping around
    pub fn next(&self) -> Self {
        let index = Self::PREFERRED.iter().position(|r| r == self).unwrap_or(0);
        Self::PREFERRED[(index + 1) % Self::PREFERRED.len()]
    }

    pub fn iso2(&self) -> &'static str {
        match self {
            Self::India => "in",
            Self::UnitedStates => "us",
            Self::UnitedKingdom => "gb",
        }
    }

    pub fn dial_code(&self) -> &'static str {
        match self {
            Self::India => "+91",
            Self::UnitedStates => "+1",
            Self::UnitedKingdom => "+44",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::India => "India",
            Self::UnitedStates => "United States",
            Self::UnitedKingdom => "United Kingdom",
        }
    }
}

/// Whether a keystroke may reach the phone field at all.
pub fn accepts_key(code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => c.is_ascii_digit(),
        KeyCode::Backspace
        | KeyCode::Delete
        | KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Up
        | KeyCode::Down => true,
        _ => false,
    }
}

/// Strip every non-digit and apply the region length cap.
pub fn sanitize(raw: &str, region: Region) -> String {
    let digits = raw.chars().filter(|c| c.is_ascii_digit());
    match region {
        Region::India => digits.take(INDIA_MAX_DIGITS).collect(),
        _ => digits.collect(),
    }
}

/// Region-aware validity of a national number.
pub fn is_valid(digits: &str, region: Region) -> bool {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let bytes = digits.as_bytes();
    match region {
        Region::India => bytes.len() == 10 && (b'6'..=b'9').contains(&bytes[0]),
        // NANP: NXX-NXX-XXXX
        Region::UnitedStates => {
            bytes.len() == 10
                && (b'2'..=b'9').contains(&bytes[0])
                && (b'2'..=b'9').contains(&bytes[3])
        }
        Region::UnitedKingdom => bytes.len() == 10 && bytes[0] == b'7',
    }
}

/// Adapter wrapping the tel input: owns the region selection, while the
/// digits themselves live in the input's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhoneAdapter {
    pub region: Region,
}

impl PhoneAdapter {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// Apply a keystroke to `value`. Returns true when the value changed.
    pub fn handle_key(&self, value: &mut String, code: KeyCode) -> bool {
        if !accepts_key(code) {
            return false;
        }
        let next = match code {
            KeyCode::Char(c) => {
                let mut next = value.clone();
                next.push(c);
                sanitize(&next, self.region)
            }
            KeyCode::Backspace | KeyCode::Delete => {
                let mut next = sanitize(value, self.region);
                next.pop();
                next
            }
            _ => return false,
        };
        let changed = next != *value;
        *value = next;
        changed
    }

    /// Move to the next preferred region and re-apply its length cap.
    pub fn cycle_region(&mut self, value: &mut String) {
        self.region = self.region.next();
        *value = sanitize(value, self.region);
    }

    /// Re-apply the region's digit rules to a value that did not come
    /// through `handle_key`, such as one restored from storage
    pub fn normalize(&self, value: &mut String) -> bool {
        let clean = sanitize(value, self.region);
        if clean == *value {
            return false;
        }
        *value = clean;
        true
    }

    pub fn is_valid(&self, value: &str) -> bool {
        is_valid(value, self.region)
    }
}
