//! # VOTable Reference Vocabularies
//!
//! Closed vocabularies used by the `COOSYS` element: the celestial reference
//! frame (`system` attribute) and the reference position (`refposition`
//! attribute).
//!
//! Resolution from raw attribute text never fails. Canonical tags are matched
//! first, then the deprecated aliases of older VOTable versions, and anything
//! else resolves to `UNKNOWN`.
//!
//! ## Reference
//! - IVOA VOTable 1.4, section 2.2 (COOSYS)
//! - IVOA STC reference frame vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Celestial coordinate reference frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceFrame {
    /// Local azimuth/elevation
    #[serde(rename = "AZ_EL")]
    AzEl,
    /// Body-fixed frame of a solar-system body
    #[serde(rename = "BODY")]
    Body,
    /// Generic ecliptic frame
    #[serde(rename = "ECLIPTIC")]
    Ecliptic,
    /// Generic equatorial frame
    #[serde(rename = "EQUATORIAL")]
    Equatorial,
    /// FK4 equatorial frame
    #[serde(rename = "FK4")]
    Fk4,
    /// FK5 equatorial frame
    #[serde(rename = "FK5")]
    Fk5,
    /// Galactic frame (IAU 1958)
    #[serde(rename = "GALACTIC")]
    Galactic,
    /// Old galactic frame
    #[serde(rename = "GALACTIC_I")]
    GalacticI,
    /// Generic galactic frame
    #[serde(rename = "GENERIC_GALACTIC")]
    GenericGalactic,
    /// International Celestial Reference System
    #[serde(rename = "ICRS")]
    Icrs,
    /// De Vaucouleurs supergalactic frame
    #[serde(rename = "SUPER_GALACTIC")]
    SuperGalactic,
    /// Unresolvable or unspecified frame
    #[serde(rename = "UNKNOWN")]
    Unknown,
    /// Ecliptic frame tied to FK4
    #[serde(rename = "ecl_FK4")]
    EclFk4,
    /// Ecliptic frame tied to FK5
    #[serde(rename = "ecl_FK5")]
    EclFk5,
}

impl ReferenceFrame {
    /// Every frame, in canonical tag order
    pub const ALL: [ReferenceFrame; 14] = [
        ReferenceFrame::AzEl,
        ReferenceFrame::Body,
        ReferenceFrame::Ecliptic,
        ReferenceFrame::Equatorial,
        ReferenceFrame::Fk4,
        ReferenceFrame::Fk5,
        ReferenceFrame::Galactic,
        ReferenceFrame::GalacticI,
        ReferenceFrame::GenericGalactic,
        ReferenceFrame::Icrs,
        ReferenceFrame::SuperGalactic,
        ReferenceFrame::Unknown,
        ReferenceFrame::EclFk4,
        ReferenceFrame::EclFk5,
    ];

    /// Canonical VOTable tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceFrame::AzEl => "AZ_EL",
            ReferenceFrame::Body => "BODY",
            ReferenceFrame::Ecliptic => "ECLIPTIC",
            ReferenceFrame::Equatorial => "EQUATORIAL",
            ReferenceFrame::Fk4 => "FK4",
            ReferenceFrame::Fk5 => "FK5",
            ReferenceFrame::Galactic => "GALACTIC",
            ReferenceFrame::GalacticI => "GALACTIC_I",
            ReferenceFrame::GenericGalactic => "GENERIC_GALACTIC",
            ReferenceFrame::Icrs => "ICRS",
            ReferenceFrame::SuperGalactic => "SUPER_GALACTIC",
            ReferenceFrame::Unknown => "UNKNOWN",
            ReferenceFrame::EclFk4 => "ecl_FK4",
            ReferenceFrame::EclFk5 => "ecl_FK5",
        }
    }

    /// Look up a canonical tag (exact, case-sensitive)
    pub fn from_canonical(raw: &str) -> Option<Self> {
        let frame = match raw {
            "AZ_EL" => ReferenceFrame::AzEl,
            "BODY" => ReferenceFrame::Body,
            "ECLIPTIC" => ReferenceFrame::Ecliptic,
            "EQUATORIAL" => ReferenceFrame::Equatorial,
            "FK4" => ReferenceFrame::Fk4,
            "FK5" => ReferenceFrame::Fk5,
            "GALACTIC" => ReferenceFrame::Galactic,
            "GALACTIC_I" => ReferenceFrame::GalacticI,
            "GENERIC_GALACTIC" => ReferenceFrame::GenericGalactic,
            "ICRS" => ReferenceFrame::Icrs,
            "SUPER_GALACTIC" => ReferenceFrame::SuperGalactic,
            "UNKNOWN" => ReferenceFrame::Unknown,
            "ecl_FK4" => ReferenceFrame::EclFk4,
            "ecl_FK5" => ReferenceFrame::EclFk5,
            _ => return None,
        };
        Some(frame)
    }

    /// Look up a deprecated alias from older VOTable versions
    pub fn from_deprecated(raw: &str) -> Option<Self> {
        let frame = match raw {
            "barycentric" => ReferenceFrame::Icrs,
            "eq_FK4" => ReferenceFrame::Fk4,
            "eq_FK5" => ReferenceFrame::Fk5,
            "galactic" => ReferenceFrame::Galactic,
            "supergalactic" => ReferenceFrame::SuperGalactic,
            _ => return None,
        };
        Some(frame)
    }

    /// Resolve a `system` attribute value, degrading to [`ReferenceFrame::Unknown`]
    pub fn from_tag(raw: &str) -> Self {
        Self::from_canonical(raw)
            .or_else(|| Self::from_deprecated(raw))
            .unwrap_or(ReferenceFrame::Unknown)
    }

    /// Generic frame this frame specializes, if any
    pub fn parent(&self) -> Option<ReferenceFrame> {
        match self {
            ReferenceFrame::Fk4 | ReferenceFrame::Fk5 | ReferenceFrame::Icrs => {
                Some(ReferenceFrame::Equatorial)
            }
            ReferenceFrame::EclFk4 | ReferenceFrame::EclFk5 => Some(ReferenceFrame::Ecliptic),
            ReferenceFrame::Galactic | ReferenceFrame::GalacticI => {
                Some(ReferenceFrame::GenericGalactic)
            }
            _ => None,
        }
    }

    /// Equinox implied by the frame when `COOSYS` omits one
    ///
    /// FK4-based frames default to B1950.0, FK5-based frames to J2000.0.
    pub fn default_equinox(&self) -> Option<&'static str> {
        match self {
            ReferenceFrame::Fk4 | ReferenceFrame::EclFk4 => Some("B1950.0"),
            ReferenceFrame::Fk5 | ReferenceFrame::EclFk5 => Some("J2000.0"),
            _ => None,
        }
    }
}

impl From<&str> for ReferenceFrame {
    fn from(raw: &str) -> Self {
        Self::from_tag(raw)
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spatial origin that positions and times are referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReferencePosition {
    /// Solar-system barycenter
    Barycenter,
    /// Earth-Moon barycenter
    Embarycenter,
    /// Center of the Earth
    Geocenter,
    /// Center of the Sun
    Heliocenter,
    /// Location of the observer
    Topocenter,
    /// Unresolvable or unspecified position
    Unknown,
}

impl ReferencePosition {
    /// Every position, in canonical tag order
    pub const ALL: [ReferencePosition; 6] = [
        ReferencePosition::Barycenter,
        ReferencePosition::Embarycenter,
        ReferencePosition::Geocenter,
        ReferencePosition::Heliocenter,
        ReferencePosition::Topocenter,
        ReferencePosition::Unknown,
    ];

    /// Canonical VOTable tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferencePosition::Barycenter => "BARYCENTER",
            ReferencePosition::Embarycenter => "EMBARYCENTER",
            ReferencePosition::Geocenter => "GEOCENTER",
            ReferencePosition::Heliocenter => "HELIOCENTER",
            ReferencePosition::Topocenter => "TOPOCENTER",
            ReferencePosition::Unknown => "UNKNOWN",
        }
    }

    /// Resolve a `refposition` attribute value, degrading to [`ReferencePosition::Unknown`]
    pub fn from_tag(raw: &str) -> Self {
        match raw {
            "BARYCENTER" => ReferencePosition::Barycenter,
            "EMBARYCENTER" => ReferencePosition::Embarycenter,
            "GEOCENTER" => ReferencePosition::Geocenter,
            "HELIOCENTER" => ReferencePosition::Heliocenter,
            "TOPOCENTER" => ReferencePosition::Topocenter,
            _ => ReferencePosition::Unknown,
        }
    }
}

impl From<&str> for ReferencePosition {
    fn from(raw: &str) -> Self {
        Self::from_tag(raw)
    }
}

impl fmt::Display for ReferencePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
