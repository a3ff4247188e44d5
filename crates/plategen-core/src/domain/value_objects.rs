//! Domain value objects: TemplateId, CodeAlphabet, ArtifactFormat, Point.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO layout data. Everything a template knows about its geometry
//! lives in `registry.rs`. This file's only job is to define the types, their
//! string representations, and their `FromStr` parsers.
//!
//! # Adding a New Template
//!
//! 1. Add the `TemplateId` variant here, plus its `as_str` and `FromStr` arms
//! 2. Add a `TemplateConfig` entry in `registry.rs`
//! 3. Ship its `.scad` source script with the adapters crate

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── TemplateId ───────────────────────────────────────────────────────────────

/// A supported plate template.
///
/// The set is closed: unknown identifiers are rejected at parse time with
/// [`DomainError::UnknownTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[serde(rename = "dubai_new")]
    DubaiNew,
    #[serde(rename = "dubai_old")]
    DubaiOld,
    #[serde(rename = "dubai_new_sm")]
    DubaiNewSmall,
    #[serde(rename = "sharjah_old")]
    SharjahOld,
}

impl TemplateId {
    /// Every template, in display order.
    pub const ALL: [TemplateId; 4] = [
        Self::DubaiNew,
        Self::DubaiNewSmall,
        Self::DubaiOld,
        Self::SharjahOld,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DubaiNew => "dubai_new",
            Self::DubaiOld => "dubai_old",
            Self::DubaiNewSmall => "dubai_new_sm",
            Self::SharjahOld => "sharjah_old",
        }
    }

    /// Layout configuration for this template.
    ///
    /// Delegates to `registry::lookup`. Do not add match arms here.
    pub fn config(self) -> &'static crate::domain::registry::TemplateConfig {
        crate::domain::registry::lookup(self)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dubai_new" => Ok(Self::DubaiNew),
            "dubai_old" => Ok(Self::DubaiOld),
            "dubai_new_sm" => Ok(Self::DubaiNewSmall),
            "sharjah_old" => Ok(Self::SharjahOld),
            other => Err(DomainError::UnknownTemplate {
                name: other.to_string(),
            }),
        }
    }
}

// ── CodeAlphabet ──────────────────────────────────────────────────────────────

/// Characters a template accepts in its plate code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeAlphabet {
    /// ASCII letters `A-Z` (input is upper-cased first).
    Letters,
    /// ASCII digits `0-9`.
    Digits,
}

impl CodeAlphabet {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Letters => "letters",
            Self::Digits => "digits",
        }
    }

    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Letters => c.is_ascii_uppercase(),
            Self::Digits => c.is_ascii_digit(),
        }
    }
}

impl fmt::Display for CodeAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ArtifactFormat ────────────────────────────────────────────────────────────

/// Model file format requested from the geometry compiler.
///
/// OpenSCAD picks its exporter from the output file extension, so the
/// format is fully described by [`ArtifactFormat::extension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    Stl,
    #[serde(rename = "3mf")]
    ThreeMf,
    Off,
    Amf,
}

impl ArtifactFormat {
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::ThreeMf => "3mf",
            Self::Off => "off",
            Self::Amf => "amf",
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ArtifactFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "stl" => Ok(Self::Stl),
            "3mf" => Ok(Self::ThreeMf),
            "off" => Ok(Self::Off),
            "amf" => Ok(Self::Amf),
            other => Err(DomainError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A 2D position on the plate face, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
