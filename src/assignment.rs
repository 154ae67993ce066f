use std::fmt;

use crate::error::ConfigError;
use crate::navigator::Navigator;
use crate::segmenter::SegmentationPolicy;
use PolicyKind::{BulkyWord as B, FineWord as F, Word as W};

/// Preset used when the configuration does not pick one
pub const DEFAULT_ASSIGNMENT_INDEX: usize = 9;

/// Segmentation policy without its runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Word,
    FineWord,
    BulkyWord,
}

impl PolicyKind {
    /// Build the policy, compiling the bulky matcher from `punctuation` when needed
    pub fn compile(self, punctuation: &str) -> Result<SegmentationPolicy, ConfigError> {
        match self {
            PolicyKind::Word => Ok(SegmentationPolicy::Word),
            PolicyKind::FineWord => Ok(SegmentationPolicy::FineWord),
            PolicyKind::BulkyWord => SegmentationPolicy::bulky(punctuation),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Word => f.write_str("navigate by word"),
            PolicyKind::FineWord => f.write_str("navigate by fine word"),
            PolicyKind::BulkyWord => f.write_str("navigate by bulky word"),
        }
    }
}

/// Gesture family that triggers word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKey {
    /// Left Control + Left/Right arrow
    LeftControl,
    /// Right Control + Left/Right arrow
    RightControl,
    /// Control + Windows + Left/Right arrow
    ControlWindows,
}

/// Which policy each gesture family uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAssignment {
    pub left_control: PolicyKind,
    pub right_control: PolicyKind,
    pub control_windows: Option<PolicyKind>,
}

const fn preset(
    left_control: PolicyKind,
    right_control: PolicyKind,
    control_windows: Option<PolicyKind>,
) -> KeyAssignment {
    KeyAssignment {
        left_control,
        right_control,
        control_windows,
    }
}

/// Selectable command assignments, addressed by `assignment_index`
pub static ASSIGNMENTS: [KeyAssignment; 11] = [
    preset(W, W, None),
    preset(W, W, Some(B)),
    preset(W, W, Some(F)),
    preset(W, B, None),
    preset(W, F, None),
    preset(B, W, None),
    preset(F, W, None),
    preset(W, B, Some(F)),
    preset(W, F, Some(B)),
    preset(B, W, Some(F)),
    preset(F, W, Some(B)),
];

impl KeyAssignment {
    /// Look up a preset by index
    pub fn get(index: usize) -> Result<&'static KeyAssignment, ConfigError> {
        ASSIGNMENTS.get(index).ok_or(ConfigError::AssignmentIndex {
            index,
            max: ASSIGNMENTS.len() - 1,
        })
    }

    pub fn policy_kind(&self, key: GestureKey) -> Option<PolicyKind> {
        match key {
            GestureKey::LeftControl => Some(self.left_control),
            GestureKey::RightControl => Some(self.right_control),
            GestureKey::ControlWindows => self.control_windows,
        }
    }
}

impl fmt::Display for KeyAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.left_control == self.right_control {
            write!(f, "Left or Right Control = {}", self.left_control)?;
        } else {
            write!(
                f,
                "Left Control = {}, Right Control = {}",
                self.left_control, self.right_control
            )?;
        }
        match self.control_windows {
            Some(kind) => write!(f, ", Control+Windows = {kind}"),
            None => write!(f, ", Control+Windows = unassigned"),
        }
    }
}

/// Compiled, immutable policies for every gesture family
///
/// Built once when the configuration is loaded; navigation only reads it.
#[derive(Debug, Clone)]
pub struct KeyPolicies {
    left_control: SegmentationPolicy,
    right_control: SegmentationPolicy,
    control_windows: Option<SegmentationPolicy>,
    max_paragraph_crossings: usize,
}

impl KeyPolicies {
    pub fn new(
        assignment: &KeyAssignment,
        bulky_punctuation: &str,
        max_paragraph_crossings: usize,
    ) -> Result<Self, ConfigError> {
        if max_paragraph_crossings == 0 {
            return Err(ConfigError::CrossingBudget);
        }

        Ok(Self {
            left_control: assignment.left_control.compile(bulky_punctuation)?,
            right_control: assignment.right_control.compile(bulky_punctuation)?,
            control_windows: assignment
                .control_windows
                .map(|kind| kind.compile(bulky_punctuation))
                .transpose()?,
            max_paragraph_crossings,
        })
    }

    /// Policy bound to a gesture family, `None` when it is unassigned
    pub fn policy_for(&self, key: GestureKey) -> Option<&SegmentationPolicy> {
        match key {
            GestureKey::LeftControl => Some(&self.left_control),
            GestureKey::RightControl => Some(&self.right_control),
            GestureKey::ControlWindows => self.control_windows.as_ref(),
        }
    }

    pub fn max_paragraph_crossings(&self) -> usize {
        self.max_paragraph_crossings
    }

    /// Navigator for a gesture family, `None` when it is unassigned
    pub fn navigator(&self, key: GestureKey) -> Option<Navigator<'_>> {
        self.policy_for(key).map(|policy| {
            Navigator::new(policy).with_max_paragraph_crossings(self.max_paragraph_crossings)
        })
    }
}
