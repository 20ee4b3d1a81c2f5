use crate::constants::{DEFAULT_CREEP_PT, DEFAULT_SUFFIX, PAGES_PER_SHEET};
use crate::types::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one booklet run.
///
/// Every knob of a run lives here; nothing is read from process-wide
/// state, so two runs with different options can share a process.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookletOptions {
    // Output location
    /// Directory finished booklets are written into.
    pub destination: PathBuf,
    /// Appended to the document title to form the output file name.
    pub suffix: String,

    // Sheet geometry
    /// Physical sheet the booklet is printed on.
    pub sheet_size: SheetSize,
    /// Creep compensation in points, applied once per completed sheet.
    /// The drift accumulates for the whole run; a large value will
    /// eventually walk the two leaves into each other, which is accepted
    /// rather than detected.
    pub creep_pt: f32,

    // Arrangement
    /// Page slots per physical sheet. Only 4 (two-up duplex) is supported.
    pub pages_per_sheet: u32,
    /// Reserved: split long booklets into signatures of this many sheets.
    /// Accepted for forward compatibility; currently has no effect.
    pub signature: usize,

    // Drawing
    /// Stroke a frame around each placed page.
    pub outline: bool,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("."),
            suffix: DEFAULT_SUFFIX.to_string(),
            sheet_size: SheetSize::A3,
            creep_pt: DEFAULT_CREEP_PT,
            pages_per_sheet: PAGES_PER_SHEET,
            signature: 0,
            outline: false,
        }
    }
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.pages_per_sheet != PAGES_PER_SHEET {
            return Err(BookletError::Config(format!(
                "Two-up saddle stitch needs {} pages per sheet, got {}",
                PAGES_PER_SHEET, self.pages_per_sheet
            )));
        }

        if !self.creep_pt.is_finite() {
            return Err(BookletError::Config(
                "Creep must be a finite number of points".to_string(),
            ));
        }

        let (width_pt, height_pt) = self.sheet_size.dimensions_pt();
        if !width_pt.is_finite() || !height_pt.is_finite() || width_pt <= 0.0 || height_pt <= 0.0 {
            return Err(BookletError::Config(format!(
                "Sheet size must be positive, got {}x{}pt",
                width_pt, height_pt
            )));
        }

        Ok(())
    }

    /// Output file path for a document called `title`.
    ///
    /// Any extension on the title is dropped before the suffix goes on,
    /// so "report.pdf" ends up as "report booklet.pdf".
    pub fn output_path(&self, title: &str) -> PathBuf {
        let stem = Path::new(title)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.destination.join(format!("{}{}", stem, self.suffix))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    // Manual implementation so named sizes serialize as plain strings and
    // only Custom needs a map.
    impl Serialize for SheetSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                SheetSize::A4 => serializer.serialize_str("A4"),
                SheetSize::A3 => serializer.serialize_str("A3"),
                SheetSize::Letter => serializer.serialize_str("Letter"),
                SheetSize::Tabloid => serializer.serialize_str("Tabloid"),
                SheetSize::Custom {
                    width_pt,
                    height_pt,
                } => {
                    let mut s = serializer.serialize_struct("Custom", 2)?;
                    s.serialize_field("width_pt", width_pt)?;
                    s.serialize_field("height_pt", height_pt)?;
                    s.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for SheetSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};
            use std::fmt;

            struct SheetSizeVisitor;

            impl<'de> Visitor<'de> for SheetSizeVisitor {
                type Value = SheetSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sheet size")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<SheetSize, E>
                where
                    E: de::Error,
                {
                    match value {
                        "A4" => Ok(SheetSize::A4),
                        "A3" => Ok(SheetSize::A3),
                        "Letter" => Ok(SheetSize::Letter),
                        "Tabloid" => Ok(SheetSize::Tabloid),
                        _ => Err(de::Error::unknown_variant(
                            value,
                            &["A4", "A3", "Letter", "Tabloid", "Custom"],
                        )),
                    }
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<SheetSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut width_pt = None;
                    let mut height_pt = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "width_pt" => width_pt = Some(map.next_value()?),
                            "height_pt" => height_pt = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (width_pt, height_pt) {
                        (Some(w), Some(h)) => Ok(SheetSize::Custom {
                            width_pt: w,
                            height_pt: h,
                        }),
                        _ => Err(de::Error::missing_field("width_pt or height_pt")),
                    }
                }
            }

            deserializer.deserialize_any(SheetSizeVisitor)
        }
    }
}
