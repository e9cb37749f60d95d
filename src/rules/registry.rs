//! Rule registry.
//!
//! Maps each known rule name to a constructor that binds the rule's keyword arguments.
//! Arguments are deserialized into the rule struct itself, so unknown or ill-typed arguments
//! are reported at resolution time.
use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;
use serde::de::DeserializeOwned;

use super::{Named, RuleKind, RuleRef};
use crate::error::Error;
use crate::filtering::window::{ExcerptArgs, TopArgs};
use crate::filtering::{
    CharLength, Contains, DigitsRatio, DigitsSumMismatch, Duplicates, Filter, FilterChain,
    NonAlphanumRatio, SourceTargetRatio, Window, WindowSpec,
};
use crate::transformers::{
    Augment, AugmenterChain, FirstCaseNormalize, Lowercase, RemoveChars,
    RemoveUnpairedQuotesAndBrackets, SingleWordPunctuation, Transform, TransformChain,
};

/// A resolved filter declaration.
pub enum FilterRule {
    Predicate(Box<dyn Filter>),
    /// `top`/`excerpt`: enforced by iteration bounds rather than evaluated on pairs.
    Window(WindowSpec),
}

type FilterCtor = fn(&RuleRef) -> Result<FilterRule, Error>;
type TransformCtor = fn(&RuleRef) -> Result<Box<dyn Transform>, Error>;
type AugmentCtor = fn(&RuleRef) -> Result<Box<dyn Augment>, Error>;

/// bind keyword arguments
fn args<T: DeserializeOwned>(rule: &RuleRef) -> Result<T, Error> {
    serde_json::from_value(rule.kwargs.clone()).map_err(|e| {
        Error::Config(format!("invalid arguments for rule {:?}: {}", rule.name, e))
    })
}

fn predicate<T: Filter + DeserializeOwned + 'static>(rule: &RuleRef) -> Result<FilterRule, Error> {
    Ok(FilterRule::Predicate(Box::new(args::<T>(rule)?)))
}

fn top(rule: &RuleRef) -> Result<FilterRule, Error> {
    WindowSpec::from_top_args(args::<TopArgs>(rule)?).map(FilterRule::Window)
}

fn excerpt(rule: &RuleRef) -> Result<FilterRule, Error> {
    WindowSpec::from_excerpt_args(args::<ExcerptArgs>(rule)?).map(FilterRule::Window)
}

fn transform<T: Transform + DeserializeOwned + 'static>(
    rule: &RuleRef,
) -> Result<Box<dyn Transform>, Error> {
    Ok(Box::new(args::<T>(rule)?))
}

fn augmenter<T: Augment + DeserializeOwned + 'static>(
    rule: &RuleRef,
) -> Result<Box<dyn Augment>, Error> {
    Ok(Box::new(args::<T>(rule)?))
}

lazy_static! {
    static ref FILTERS: HashMap<&'static str, FilterCtor> = {
        let mut m: HashMap<&'static str, FilterCtor> = HashMap::new();
        m.insert("duplicates", predicate::<Duplicates>);
        m.insert("char_length", predicate::<CharLength>);
        m.insert("source_target_ratio", predicate::<SourceTargetRatio>);
        m.insert("contains", predicate::<Contains>);
        m.insert("digits_ratio", predicate::<DigitsRatio>);
        m.insert("nonalphanum_ratio", predicate::<NonAlphanumRatio>);
        m.insert("digits_sum_mismatch", predicate::<DigitsSumMismatch>);
        m.insert("top", top);
        m.insert("excerpt", excerpt);
        m
    };
    static ref TRANSFORMS: HashMap<&'static str, TransformCtor> = {
        let mut m: HashMap<&'static str, TransformCtor> = HashMap::new();
        m.insert(
            "remove_unpaired_quotes_and_brackets",
            transform::<RemoveUnpairedQuotesAndBrackets>,
        );
        m.insert("remove_chars", transform::<RemoveChars>);
        m.insert("first_case_normalize", transform::<FirstCaseNormalize>);
        m
    };
    static ref AUGMENTERS: HashMap<&'static str, AugmentCtor> = {
        let mut m: HashMap<&'static str, AugmentCtor> = HashMap::new();
        m.insert("single_word_punctuation", augmenter::<SingleWordPunctuation>);
        m.insert("lowercase", augmenter::<Lowercase>);
        m
    };
}

/// Known rule names of a namespace, sorted.
pub fn names(kind: RuleKind) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = match kind {
        RuleKind::Filter => FILTERS.keys().copied().collect(),
        RuleKind::Transform => TRANSFORMS.keys().copied().collect(),
        RuleKind::Augmenter => AUGMENTERS.keys().copied().collect(),
    };
    names.sort_unstable();
    names
}

fn unknown(kind: RuleKind, rule: &RuleRef) -> Error {
    Error::UnknownRule {
        kind,
        name: rule.name.clone(),
    }
}

/// Resolved rules of a source.
#[derive(Default)]
pub struct RuleSet {
    pub filters: FilterChain,
    pub transforms: TransformChain,
    pub augmenters: AugmenterChain,
    pub windows: Vec<WindowSpec>,
}

impl RuleSet {
    /// Line window of a source of `nb_lines` lines, if any windowing rule is declared.
    pub fn window(&self, nb_lines: usize) -> Option<Window> {
        self.windows
            .iter()
            .map(|w| w.window(nb_lines))
            .reduce(Window::intersect)
    }

    pub fn has_window(&self) -> bool {
        !self.windows.is_empty()
    }
}

/// Resolve rule references into a [RuleSet].
pub fn resolve(
    filters: &[RuleRef],
    transforms: &[RuleRef],
    augmenters: &[RuleRef],
) -> Result<RuleSet, Error> {
    let mut rules = RuleSet::default();

    for rule in filters {
        let ctor = FILTERS
            .get(rule.name.as_str())
            .ok_or_else(|| unknown(RuleKind::Filter, rule))?;
        match ctor(rule)? {
            FilterRule::Predicate(f) => {
                rules.filters.add(Named::new(&rule.name, f));
            }
            FilterRule::Window(w) => rules.windows.push(w),
        }
    }

    for rule in transforms {
        let ctor = TRANSFORMS
            .get(rule.name.as_str())
            .ok_or_else(|| unknown(RuleKind::Transform, rule))?;
        rules.transforms.add(Named::new(&rule.name, ctor(rule)?));
    }

    for rule in augmenters {
        let ctor = AUGMENTERS
            .get(rule.name.as_str())
            .ok_or_else(|| unknown(RuleKind::Augmenter, rule))?;
        rules.augmenters.add(Named::new(&rule.name, ctor(rule)?));
    }

    debug!(
        "resolved filters {:?}, windows {:?}, transforms {:?}, augmenters {:?}",
        rules.filters.names().collect::<Vec<_>>(),
        rules.windows,
        rules.transforms.names().collect::<Vec<_>>(),
        rules.augmenters.names().collect::<Vec<_>>()
    );

    Ok(rules)
}
