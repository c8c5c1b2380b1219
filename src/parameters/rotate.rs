use serde::Serialize;

use super::base::SingleSourceBase;
use crate::output::OutputType;
use crate::page::{PageNumber, PageOptions};
use crate::validation::{Constrained, Constraint, ConstraintTable, CrossFieldRule, Field, FieldRule};
use crate::view::FrozenMap;

/// Clockwise page rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    None,
    Degrees90,
    Degrees180,
    Degrees270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Degrees90 => 90,
            Rotation::Degrees180 => 180,
            Rotation::Degrees270 => 270,
        }
    }

    /// Rotation for a multiple of 90 degrees, negative values turning counterclockwise.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Degrees90),
            180 => Some(Rotation::Degrees180),
            _ => Some(Rotation::Degrees270),
        }
    }
}

/// Parameters for rotating pages of a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RotateParameters {
    #[serde(flatten)]
    base: SingleSourceBase,
    rotations: PageOptions<Rotation>,
}

impl RotateParameters {
    pub const ACCEPTED_OUTPUTS: &'static [&'static str] =
        &[OutputType::SingleFile.as_str(), OutputType::Stream.as_str()];

    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters rotating every page without its own rotation by `default`.
    pub fn with_default_rotation(default: Rotation) -> Self {
        Self {
            rotations: PageOptions::with_default(default),
            ..Self::default()
        }
    }

    pub fn base(&self) -> &SingleSourceBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut SingleSourceBase {
        &mut self.base
    }

    /// Associates `rotation` with `page`, returning the rotation it replaced.
    pub fn put_rotation(&mut self, page: PageNumber, rotation: Rotation) -> Option<Rotation> {
        self.rotations.put(page, rotation)
    }

    pub fn clear_rotations(&mut self) {
        self.rotations.clear();
    }

    pub fn rotations(&self) -> FrozenMap<'_, PageNumber, Rotation> {
        self.rotations.view()
    }

    pub fn default_rotation(&self) -> Option<Rotation> {
        self.rotations.default_value().copied()
    }

    pub fn rotation_for(&self, page: PageNumber) -> Option<Rotation> {
        self.rotations.effective(page).copied()
    }

    pub fn holds_stream(&self) -> bool {
        self.base.holds_stream()
    }
}

fn has_rotations(params: &RotateParameters) -> Result<(), String> {
    if params.rotations.is_unset() {
        Err("no page rotation and no default rotation set".to_string())
    } else {
        Ok(())
    }
}

impl Constrained for RotateParameters {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<RotateParameters> = ConstraintTable {
            fields: &[
                FieldRule {
                    name: "base",
                    constraints: &[],
                    value: |p| Field::Embedded(&p.base),
                },
                FieldRule {
                    name: "output",
                    constraints: &[
                        Constraint::Required,
                        Constraint::OneOf(RotateParameters::ACCEPTED_OUTPUTS),
                        Constraint::Nested,
                    ],
                    value: |p| p.base.output_field(),
                },
            ],
            rules: &[CrossFieldRule {
                name: "rotations",
                check: has_rotations,
            }],
        };
        &TABLE
    }
}
