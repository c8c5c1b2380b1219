use serde::Serialize;

use super::base::SingleSourceBase;
use crate::output::OutputType;
use crate::page::{PageNumber, PageOptions};
use crate::validation::{
    Constrained, Constraint, ConstraintTable, CrossFieldRule, Field, FieldRule, Validate,
};
use crate::view::FrozenMap;

/// Visual effect used when moving from one page to the next in presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfPageTransitionStyle {
    SplitHorizontalInward,
    SplitHorizontalOutward,
    SplitVerticalInward,
    SplitVerticalOutward,
    BlindsHorizontal,
    BlindsVertical,
    BoxInward,
    BoxOutward,
    WipeLeftToRight,
    WipeBottomToTop,
    WipeRightToLeft,
    WipeTopToBottom,
    Dissolve,
    GlitterLeftToRight,
    GlitterTopToBottom,
    GlitterDiagonal,
    FlyLeftToRight,
    FlyTopToBottom,
    PushLeftToRight,
    PushTopToBottom,
    CoverLeftToRight,
    CoverTopToBottom,
    UncoverLeftToRight,
    UncoverTopToBottom,
    Fade,
    Replace,
}

/// A page transition: the effect, how long it lasts and how long the page is shown.
/// Durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PdfPageTransition {
    style: PdfPageTransitionStyle,
    transition_duration: u32,
    display_duration: u32,
}

impl PdfPageTransition {
    pub fn new(
        style: PdfPageTransitionStyle,
        transition_duration: u32,
        display_duration: u32,
    ) -> Self {
        Self {
            style,
            transition_duration,
            display_duration,
        }
    }

    pub fn style(&self) -> PdfPageTransitionStyle {
        self.style
    }

    pub fn transition_duration(&self) -> u32 {
        self.transition_duration
    }

    pub fn display_duration(&self) -> u32 {
        self.display_duration
    }
}

impl Constrained for PdfPageTransition {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<PdfPageTransition> = ConstraintTable {
            fields: &[
                FieldRule {
                    name: "transition_duration",
                    constraints: &[Constraint::Min(1)],
                    value: |t| Field::Int(i64::from(t.transition_duration)),
                },
                FieldRule {
                    name: "display_duration",
                    constraints: &[Constraint::Min(1)],
                    value: |t| Field::Int(i64::from(t.display_duration)),
                },
            ],
            rules: &[],
        };
        &TABLE
    }
}

/// Parameters for setting page transitions on a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SetPagesTransitionParameters {
    #[serde(flatten)]
    base: SingleSourceBase,
    transitions: PageOptions<PdfPageTransition>,
    full_screen: bool,
}

impl SetPagesTransitionParameters {
    pub const ACCEPTED_OUTPUTS: &'static [&'static str] =
        &[OutputType::SingleFile.as_str(), OutputType::Stream.as_str()];

    /// Parameters without a default transition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters applying `default` to every page without its own transition.
    pub fn with_default_transition(default: PdfPageTransition) -> Self {
        Self {
            transitions: PageOptions::with_default(default),
            ..Self::default()
        }
    }

    pub fn base(&self) -> &SingleSourceBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut SingleSourceBase {
        &mut self.base
    }

    /// Associates `transition` with `page`. Returns the transition it replaced, if any.
    pub fn put_transition(
        &mut self,
        page: PageNumber,
        transition: PdfPageTransition,
    ) -> Option<PdfPageTransition> {
        self.transitions.put(page, transition)
    }

    /// Removes every per-page transition. The default transition is kept.
    pub fn clear_transitions(&mut self) {
        self.transitions.clear();
    }

    pub fn transitions(&self) -> FrozenMap<'_, PageNumber, PdfPageTransition> {
        self.transitions.view()
    }

    pub fn default_transition(&self) -> Option<&PdfPageTransition> {
        self.transitions.default_value()
    }

    /// Transition applied to `page`, falling back to the default one.
    pub fn transition_for(&self, page: PageNumber) -> Option<&PdfPageTransition> {
        self.transitions.effective(page)
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    pub fn set_full_screen(&mut self, full_screen: bool) {
        self.full_screen = full_screen;
    }

    pub fn holds_stream(&self) -> bool {
        self.base.holds_stream()
    }
}

fn transitions_field(params: &SetPagesTransitionParameters) -> Field<'_> {
    Field::Map(
        params
            .transitions
            .entries()
            .map(|(page, t)| (page.to_string(), t as &dyn Validate))
            .collect(),
    )
}

fn default_transition_field(params: &SetPagesTransitionParameters) -> Field<'_> {
    match params.transitions.default_value() {
        Some(t) => Field::Node(t),
        None => Field::Absent,
    }
}

fn has_transitions(params: &SetPagesTransitionParameters) -> Result<(), String> {
    if params.transitions.is_unset() {
        Err("no page transition and no default transition set".to_string())
    } else {
        Ok(())
    }
}

impl Constrained for SetPagesTransitionParameters {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<SetPagesTransitionParameters> = ConstraintTable {
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
                        Constraint::OneOf(SetPagesTransitionParameters::ACCEPTED_OUTPUTS),
                        Constraint::Nested,
                    ],
                    value: |p| p.base.output_field(),
                },
                FieldRule {
                    name: "transitions",
                    constraints: &[Constraint::Nested],
                    value: transitions_field,
                },
                FieldRule {
                    name: "default_transition",
                    constraints: &[Constraint::Nested],
                    value: default_transition_field,
                },
            ],
            rules: &[CrossFieldRule {
                name: "transitions",
                check: has_transitions,
            }],
        };
        &TABLE
    }
}
