//! Engine entry point (§5 concurrency model, §6 configuration/result).

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::context::EvaluationContext;
use crate::doctree::DocTree;
use crate::error::EngineError;
use crate::format::BooleanFormatterRegistry;
use crate::locale::Locale;
use crate::value::Value;

/// How the Placeholder Visitor reacts to an unresolvable variable (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingVariableBehavior {
    #[default]
    LeaveUnchanged,
    ReplaceWithEmpty,
    Throw,
}

/// Builder-style configuration, captured once at `TemplateProcessor`
/// construction and treated as immutable for the processor's lifetime (§5).
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub missing_variable_behavior: MissingVariableBehavior,
    pub locale: Locale,
    pub boolean_formatter_registry: BooleanFormatterRegistry,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptions {
            missing_variable_behavior: MissingVariableBehavior::default(),
            locale: Locale::invariant(),
            boolean_formatter_registry: BooleanFormatterRegistry::with_builtins(),
        }
    }
}

impl ProcessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_variable_behavior(mut self, behavior: MissingVariableBehavior) -> Self {
        self.missing_variable_behavior = behavior;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_boolean_formatter_registry(mut self, registry: BooleanFormatterRegistry) -> Self {
        self.boolean_formatter_registry = registry;
        self
    }
}

/// Outcome of `TemplateProcessor::process_template` (§6).
#[derive(Debug, Clone, Default)]
pub struct ProcessResult {
    pub success: bool,
    pub replacement_count: usize,
    pub missing_variables: BTreeSet<String>,
    pub error: Option<EngineError>,
}

/// Mutable bookkeeping shared by the walker and the three visitors for the
/// duration of one `process_template` call. Kept internal: the public
/// surface is `ProcessOptions` in, `ProcessResult` out.
pub(crate) struct VisitState<'a> {
    pub locale: &'a Locale,
    pub registry: &'a BooleanFormatterRegistry,
    pub missing_variable_behavior: MissingVariableBehavior,
    pub replacement_count: usize,
    pub missing_variables: BTreeSet<String>,
}

/// Public entry point (§2, §5). Reusable across sequential calls; holds no
/// per-call state once `process_template` returns, so a single instance is
/// safe to share across threads when the host's `Record` impls are
/// `Send + Sync`.
#[derive(Debug, Clone)]
pub struct TemplateProcessor {
    options: ProcessOptions,
}

impl TemplateProcessor {
    pub fn new(options: ProcessOptions) -> Self {
        TemplateProcessor { options }
    }

    /// Expand every template construct under `tree`'s root against `data`.
    ///
    /// On a fatal error the tree is left partially mutated up to the
    /// failing point (§7: no streaming, no implicit rollback); callers that
    /// need atomicity should process a clone.
    pub fn process_template(&self, tree: &mut DocTree, data: Value) -> ProcessResult {
        let root = tree.root_id();
        let ctx = Rc::new(EvaluationContext::global(data));
        let mut state = VisitState {
            locale: &self.options.locale,
            registry: &self.options.boolean_formatter_registry,
            missing_variable_behavior: self.options.missing_variable_behavior,
            replacement_count: 0,
            missing_variables: BTreeSet::new(),
        };

        match crate::visit::composite::walk(tree, root, &ctx, &mut state) {
            Ok(()) => ProcessResult {
                success: true,
                replacement_count: state.replacement_count,
                missing_variables: state.missing_variables,
                error: None,
            },
            Err(e) => ProcessResult {
                success: false,
                replacement_count: state.replacement_count,
                missing_variables: state.missing_variables,
                error: Some(e),
            },
        }
    }
}
