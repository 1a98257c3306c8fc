// src/config/regional.rs
//! Regional transport authorities shown on co-branded certificate pages.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalAuthority {
    pub code: &'static str,
    pub district: &'static str,
    pub officer_name: &'static str,
    pub officer_title: &'static str,
    pub photo: &'static str,
    pub description: &'static str,
}

pub const REGIONAL_AUTHORITIES: &[RegionalAuthority] = &[RegionalAuthority {
    code: "rajannasircilla",
    district: "Rajanna Sircilla",
    officer_name: "Sri Padala Rahul Garu",
    officer_title: "Regional Transport Authority Member, Rajanna Sircilla",
    photo: "/assets/leadership/Karimnagarrtamemberpadalarahul.webp",
    description: "Leads district-wide enforcement and awareness drives focusing on student community road safety pledges and compliance.",
}];

/// Case-insensitive lookup. Missing or empty codes resolve to `None`.
pub fn regional_authority(code: Option<&str>) -> Option<&'static RegionalAuthority> {
    let code = code?.trim().to_ascii_lowercase();
    if code.is_empty() {
        return None;
    }
    REGIONAL_AUTHORITIES.iter().find(|authority| authority.code == code)
}
