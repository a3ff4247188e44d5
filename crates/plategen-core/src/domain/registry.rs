//! Template layout registry.
//!
//! Each plate template is described exactly once by its [`TemplateConfig`]:
//! which source script it renders, where the code and number glyphs sit, how
//! big they are, and which codes the template accepts. All layout decisions
//! are table lookups; no geometry is computed here.
//!
//! # Two-branch rules
//!
//! A two-character code is visually wider than a one-character code, so some
//! templates shrink and shift it. Those fields are [`BranchRule`]s keyed on
//! [`is_multi_char`], and every rule uses that one threshold.
//!
//! # Adding a New Template
//!
//! 1. Add a variant to `TemplateId` in `value_objects.rs`
//! 2. Add one `static` [`TemplateConfig`] below and its arm in [`lookup`]
//! 3. Nothing else. Validation, layout and composition derive from the table

use crate::domain::error::DomainError;
use crate::domain::value_objects::{CodeAlphabet, Point, TemplateId};

// ── Rules ────────────────────────────────────────────────────────────────────

/// Whether a code of `code_len` characters takes the adjusted branch.
pub const fn is_multi_char(code_len: usize) -> bool {
    code_len > 1
}

/// A value that depends on whether the plate code has one or more characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchRule<T> {
    /// Used for one-character codes (the template's base value).
    pub single: T,
    /// Used for codes of two or more characters (the adjusted value).
    pub multi: T,
}

impl<T: Copy> BranchRule<T> {
    pub const fn new(single: T, multi: T) -> Self {
        Self { single, multi }
    }

    /// Same value regardless of code length.
    pub const fn fixed(value: T) -> Self {
        Self {
            single: value,
            multi: value,
        }
    }

    pub fn pick(&self, code_len: usize) -> T {
        if is_multi_char(code_len) {
            self.multi
        } else {
            self.single
        }
    }
}

/// Which plate codes a template accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRule {
    pub alphabet: CodeAlphabet,
    pub min_len: usize,
    pub max_len: usize,
}

impl CodeRule {
    /// Check an already upper-cased code. The error is a human reason.
    pub fn check(&self, code: &str) -> Result<(), String> {
        let len = code.chars().count();
        if len < self.min_len || len > self.max_len {
            return Err(format!("expected {}, got {len} characters", self.describe()));
        }
        if !code.chars().all(|c| self.alphabet.accepts(c)) {
            return Err(format!("expected {}", self.describe()));
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        let unit = match self.alphabet {
            CodeAlphabet::Letters => "letter",
            CodeAlphabet::Digits => "digit",
        };
        if self.min_len == self.max_len {
            let plural = if self.min_len == 1 { "" } else { "s" };
            format!("exactly {} {unit}{plural}", self.min_len)
        } else {
            format!("{} to {} {unit}s", self.min_len, self.max_len)
        }
    }
}

// ── Template definitions ─────────────────────────────────────────────────────

/// Everything the pipeline needs to know about one template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateConfig {
    pub id: TemplateId,

    /// Display name shown to users.
    pub label: &'static str,

    /// File name of the base OpenSCAD script, resolved by a `ScriptStore`.
    pub source_script: &'static str,

    /// Where the code glyphs are anchored.
    pub code_position: BranchRule<Point>,

    /// Font size of the code glyphs.
    pub code_size: BranchRule<f64>,

    /// Where the number glyphs are anchored.
    pub number_position: Point,

    /// Font size of the number glyphs.
    pub number_size: f64,

    /// Vertical (z) offset shared by code and number glyphs.
    pub baseline: f64,

    pub code_rule: CodeRule,

    /// Longest plate number the plate face has room for.
    pub max_number_digits: usize,
}

const LETTER_CODES: CodeRule = CodeRule {
    alphabet: CodeAlphabet::Letters,
    min_len: 1,
    max_len: 2,
};

const NUMBER_SIZE: f64 = 12.0;
const BASELINE: f64 = 2.95;
const MAX_NUMBER_DIGITS: usize = 5;

static DUBAI_NEW: TemplateConfig = TemplateConfig {
    id: TemplateId::DubaiNew,
    label: "Dubai Plate - New",
    source_script: "dubai_new.scad",
    code_position: BranchRule::new(Point::new(15.0, 10.0), Point::new(16.0, 10.0)),
    code_size: BranchRule::new(12.0, 7.0),
    number_position: Point::new(46.5, 10.0),
    number_size: NUMBER_SIZE,
    baseline: BASELINE,
    code_rule: LETTER_CODES,
    max_number_digits: MAX_NUMBER_DIGITS,
};

static DUBAI_OLD: TemplateConfig = TemplateConfig {
    id: TemplateId::DubaiOld,
    label: "Dubai Plate - Old",
    source_script: "dubai_old.scad",
    code_position: BranchRule::new(Point::new(16.5, 10.0), Point::new(18.5, 10.0)),
    code_size: BranchRule::new(12.0, 9.0),
    number_position: Point::new(45.5, 10.0),
    number_size: NUMBER_SIZE,
    baseline: BASELINE,
    code_rule: LETTER_CODES,
    max_number_digits: MAX_NUMBER_DIGITS,
};

static DUBAI_NEW_SMALL: TemplateConfig = TemplateConfig {
    id: TemplateId::DubaiNewSmall,
    label: "Dubai Plate - New Small",
    source_script: "dubai_new_sm.scad",
    code_position: BranchRule::new(Point::new(28.5, 5.4), Point::new(29.8, 5.4)),
    code_size: BranchRule::fixed(5.2),
    number_position: Point::new(44.0, 10.0),
    number_size: NUMBER_SIZE,
    baseline: BASELINE,
    code_rule: LETTER_CODES,
    max_number_digits: MAX_NUMBER_DIGITS,
};

static SHARJAH_OLD: TemplateConfig = TemplateConfig {
    id: TemplateId::SharjahOld,
    label: "Sharjah Plate - Old",
    source_script: "sharjah_old.scad",
    code_position: BranchRule::fixed(Point::new(15.0, 10.0)),
    code_size: BranchRule::fixed(10.0),
    number_position: Point::new(46.5, 10.0),
    number_size: NUMBER_SIZE,
    baseline: BASELINE,
    code_rule: CodeRule {
        alphabet: CodeAlphabet::Digits,
        min_len: 1,
        max_len: 1,
    },
    max_number_digits: MAX_NUMBER_DIGITS,
};

/// Single source of truth for template layouts, in display order.
pub static TEMPLATE_REGISTRY: &[&TemplateConfig] =
    &[&DUBAI_NEW, &DUBAI_NEW_SMALL, &DUBAI_OLD, &SHARJAH_OLD];

// ── Lookup ───────────────────────────────────────────────────────────────────

/// Configuration for a typed template id. Total: the match is exhaustive.
pub fn lookup(id: TemplateId) -> &'static TemplateConfig {
    match id {
        TemplateId::DubaiNew => &DUBAI_NEW,
        TemplateId::DubaiOld => &DUBAI_OLD,
        TemplateId::DubaiNewSmall => &DUBAI_NEW_SMALL,
        TemplateId::SharjahOld => &SHARJAH_OLD,
    }
}

/// Configuration for a template identifier string.
pub fn find(name: &str) -> Result<&'static TemplateConfig, DomainError> {
    name.parse::<TemplateId>().map(lookup)
}
