//! Single-pass dispatch of syntax-tree nodes to registered checks.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

use crate::check::{CheckBox, CheckContext, CheckSetup};
use crate::contents::FileContents;
use crate::kind::NodeKind;
use crate::token_types::TokenType;
use crate::tree::Node;
use crate::types::{Severity, Violation};

/// Errors raised while registering a check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A configured token is not among the check's acceptable tokens.
    #[error("token \"{token}\" is not acceptable for check {check}")]
    IllegalToken {
        /// Check name.
        check: String,
        /// Canonical token name.
        token: String,
    },
}

/// Lifecycle of one walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkState {
    /// No file walked yet.
    #[default]
    NotStarted,
    /// Dispatch is running.
    Traversing,
    /// The last walk completed without faults.
    Finished,
    /// The last walk completed but at least one check failed.
    Failed,
}

/// A check failure caught at the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFault {
    /// Name of the failing check.
    pub check: String,
    /// 1-based line of the node being processed.
    pub line: usize,
    /// 1-based, tab-expanded column of the node being processed.
    pub column: usize,
    /// Error or panic message.
    pub message: String,
}

/// What one walk produced.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Violations in emission order, `Ignore` severity already dropped.
    pub violations: Vec<Violation>,
    /// Caught check failures.
    pub faults: Vec<CheckFault>,
    /// Final state of the walk.
    pub state: WalkState,
}

#[derive(Debug, Clone, Copy)]
enum Hook {
    Begin,
    Visit,
    Leave,
    Finish,
}

struct Registered {
    check: CheckBox,
    severity: Severity,
    id: Option<String>,
}

/// Routes nodes to the checks registered for their kind.
///
/// The routing table is a dense `Vec` indexed by [`TokenType`] and is built
/// at registration, so dispatching one node costs one index lookup.
pub struct TreeWalker {
    checks: Vec<Registered>,
    routes: Vec<Vec<usize>>,
    state: WalkState,
}

impl TreeWalker {
    /// Creates a walker with no checks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            routes: vec![Vec::new(); TokenType::COUNT],
            state: WalkState::NotStarted,
        }
    }

    /// Registers a check.
    ///
    /// The check is routed the configured tokens (or its defaults) plus its
    /// required tokens.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::IllegalToken`] when a configured token is
    /// not acceptable for the check.
    pub fn register(&mut self, check: CheckBox, setup: &CheckSetup) -> Result<(), RegistrationError> {
        let mut tokens: Vec<TokenType> = match &setup.tokens {
            Some(configured) => {
                let acceptable = check.acceptable_tokens();
                if let Some(bad) = configured.iter().find(|t| !acceptable.contains(t)) {
                    return Err(RegistrationError::IllegalToken {
                        check: check.name().to_string(),
                        token: bad.name().to_string(),
                    });
                }
                configured.clone()
            }
            None => check.default_tokens().to_vec(),
        };
        tokens.extend_from_slice(check.required_tokens());
        tokens.sort_unstable();
        tokens.dedup();

        let index = self.checks.len();
        for token in &tokens {
            self.routes[token.index()].push(index);
        }
        debug!(check = check.name(), tokens = tokens.len(), "registered check");
        self.checks.push(Registered {
            severity: setup.severity.unwrap_or_else(|| check.default_severity()),
            id: setup.id.clone(),
            check,
        });
        Ok(())
    }

    /// Number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no check is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Names of the checks routed a token kind, in registration order.
    #[must_use]
    pub fn routed(&self, kind: TokenType) -> Vec<&'static str> {
        self.routes
            .get(kind.index())
            .map(|route| route.iter().map(|&i| self.checks[i].check.name()).collect())
            .unwrap_or_default()
    }

    /// State of the most recent walk.
    #[must_use]
    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Walks one file: `begin_tree` for every check, a pre-order
    /// enter/leave pass over the tree, then `finish_tree` for every check.
    pub fn walk(&mut self, contents: &FileContents, tab_width: usize) -> WalkOutcome {
        self.state = WalkState::Traversing;
        let mut ctx = CheckContext::new(contents, tab_width);
        let mut outcome = WalkOutcome::default();
        let root = contents.root();

        for index in 0..self.checks.len() {
            self.call(index, Hook::Begin, &mut ctx, root, &mut outcome);
        }

        let mut current = root;
        'walk: loop {
            self.dispatch(Hook::Visit, &mut ctx, current, &mut outcome);
            if let Some(child) = current.first_child() {
                current = child;
                continue;
            }
            loop {
                self.dispatch(Hook::Leave, &mut ctx, current, &mut outcome);
                if current == root {
                    break 'walk;
                }
                if let Some(next) = current.next_sibling() {
                    current = next;
                    break;
                }
                match current.parent() {
                    Some(parent) => current = parent,
                    None => break 'walk,
                }
            }
        }

        for index in 0..self.checks.len() {
            self.call(index, Hook::Finish, &mut ctx, root, &mut outcome);
        }

        self.state = if outcome.faults.is_empty() {
            WalkState::Finished
        } else {
            WalkState::Failed
        };
        outcome.state = self.state;
        outcome
    }

    fn dispatch(
        &mut self,
        hook: Hook,
        ctx: &mut CheckContext<'_>,
        node: Node<'_, TokenType>,
        outcome: &mut WalkOutcome,
    ) {
        let route = std::mem::take(&mut self.routes[node.kind().index()]);
        for &index in &route {
            self.call(index, hook, ctx, node, outcome);
        }
        self.routes[node.kind().index()] = route;
    }

    fn call(
        &mut self,
        index: usize,
        hook: Hook,
        ctx: &mut CheckContext<'_>,
        node: Node<'_, TokenType>,
        outcome: &mut WalkOutcome,
    ) {
        let entry = &mut self.checks[index];
        let result = catch_unwind(AssertUnwindSafe(|| match hook {
            Hook::Begin => entry.check.begin_tree(ctx, node),
            Hook::Visit => entry.check.visit_token(ctx, node),
            Hook::Leave => entry.check.leave_token(ctx, node),
            Hook::Finish => entry.check.finish_tree(ctx, node),
        }));

        let name = entry.check.name();
        for logged in ctx.take_messages() {
            if entry.severity == Severity::Ignore {
                continue;
            }
            let mut violation = Violation::new(
                ctx.contents().path(),
                logged.line,
                logged.column,
                logged.key,
                logged.message,
                entry.severity,
                name,
            );
            if let Some(id) = &entry.id {
                violation = violation.with_module_id(id.clone());
            }
            outcome.violations.push(violation);
        }

        let message = match result {
            Ok(Ok(())) => return,
            Ok(Err(err)) => err.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };
        let fault = CheckFault {
            check: name.to_string(),
            line: node.line(),
            column: ctx.expanded_column(node) + 1,
            message,
        };
        warn!(
            check = %fault.check,
            file = %ctx.contents().path().display(),
            line = fault.line,
            column = fault.column,
            hook = ?hook,
            "check failed: {}",
            fault.message
        );
        outcome.faults.push(fault);
    }
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TreeWalker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeWalker")
            .field(
                "checks",
                &self.checks.iter().map(|c| c.check.name()).collect::<Vec<_>>(),
            )
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{Check, CheckError, CheckResult};
    use std::sync::{Arc, Mutex};

    type Events = Arc<Mutex<Vec<String>>>;

    #[derive(Clone)]
    struct Recorder {
        name: &'static str,
        events: Events,
        tokens: &'static [TokenType],
    }

    impl Check for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn default_tokens(&self) -> &'static [TokenType] {
            self.tokens
        }

        fn acceptable_tokens(&self) -> &'static [TokenType] {
            &[TokenType::Ident, TokenType::MethodDef, TokenType::ClassDef]
        }

        fn begin_tree(&mut self, _: &mut CheckContext<'_>, _: Node<'_, TokenType>) -> CheckResult {
            self.push("begin".to_string());
            Ok(())
        }

        fn visit_token(&mut self, _: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
            self.push(format!("enter {}", node.kind()));
            Ok(())
        }

        fn leave_token(&mut self, _: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
            self.push(format!("leave {}", node.kind()));
            Ok(())
        }

        fn finish_tree(&mut self, _: &mut CheckContext<'_>, _: Node<'_, TokenType>) -> CheckResult {
            self.push("finish".to_string());
            Ok(())
        }
    }

    impl Recorder {
        fn push(&self, event: String) {
            self.events
                .lock()
                .expect("lock")
                .push(format!("{}: {event}", self.name));
        }
    }

    #[derive(Clone)]
    struct Exploder;

    impl Check for Exploder {
        fn name(&self) -> &'static str {
            "Exploder"
        }

        fn default_tokens(&self) -> &'static [TokenType] {
            &[TokenType::MethodDef]
        }

        fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
            ctx.log(node, "before.panic", "logged before failing");
            panic!("boom");
        }

        fn leave_token(&mut self, _: &mut CheckContext<'_>, _: Node<'_, TokenType>) -> CheckResult {
            Err(CheckError::Failed("cannot leave".to_string()))
        }
    }

    const SOURCE: &str = "class A {\n  void f() {}\n  void g() {}\n}\n";

    fn recorder(name: &'static str, events: &Events, tokens: &'static [TokenType]) -> CheckBox {
        Box::new(Recorder {
            name,
            events: Arc::clone(events),
            tokens,
        })
    }

    #[test]
    fn every_routed_node_gets_enter_and_leave() {
        let contents = FileContents::parse("A.java", SOURCE).expect("parse");
        let events = Events::default();
        let mut walker = TreeWalker::new();
        walker
            .register(recorder("one", &events, &[TokenType::MethodDef]), &CheckSetup::new())
            .expect("register");
        walker
            .register(recorder("two", &events, &[TokenType::MethodDef]), &CheckSetup::new())
            .expect("register");
        let outcome = walker.walk(&contents, 8);
        assert_eq!(outcome.state, WalkState::Finished);

        let events = events.lock().expect("lock").clone();
        let enters = events.iter().filter(|e| e.contains("enter METHOD_DEF")).count();
        let leaves = events.iter().filter(|e| e.contains("leave METHOD_DEF")).count();
        assert_eq!((enters, leaves), (4, 4));
        assert_eq!(
            &events[..2],
            &["one: begin".to_string(), "two: begin".to_string()]
        );
        assert_eq!(
            &events[2..6],
            &[
                "one: enter METHOD_DEF".to_string(),
                "two: enter METHOD_DEF".to_string(),
                "one: leave METHOD_DEF".to_string(),
                "two: leave METHOD_DEF".to_string(),
            ]
        );
        assert_eq!(events.last().map(String::as_str), Some("two: finish"));
    }

    #[test]
    fn lifecycle_runs_without_routed_nodes() {
        let contents = FileContents::parse("A.java", "package a;").expect("parse");
        let events = Events::default();
        let mut walker = TreeWalker::new();
        walker
            .register(recorder("one", &events, &[TokenType::MethodDef]), &CheckSetup::new())
            .expect("register");
        walker.walk(&contents, 8);
        assert_eq!(
            *events.lock().expect("lock"),
            vec!["one: begin".to_string(), "one: finish".to_string()]
        );
    }

    #[test]
    fn failing_check_does_not_stop_others() {
        let contents = FileContents::parse("A.java", SOURCE).expect("parse");
        let events = Events::default();
        let mut walker = TreeWalker::new();
        walker
            .register(Box::new(Exploder), &CheckSetup::new())
            .expect("register");
        walker
            .register(recorder("after", &events, &[TokenType::MethodDef]), &CheckSetup::new())
            .expect("register");
        let outcome = walker.walk(&contents, 8);

        assert_eq!(outcome.state, WalkState::Failed);
        assert_eq!(walker.state(), WalkState::Failed);
        assert_eq!(outcome.faults.len(), 4);
        assert_eq!(outcome.faults[0].check, "Exploder");
        assert_eq!(outcome.faults[0].line, 2);
        assert!(outcome.faults[0].message.contains("boom"));
        assert_eq!(outcome.faults[1].message, "cannot leave");
        assert_eq!(outcome.violations.len(), 2);

        let events = events.lock().expect("lock");
        assert_eq!(events.iter().filter(|e| e.contains("enter")).count(), 2);
        assert_eq!(events.iter().filter(|e| e.contains("leave")).count(), 2);
    }

    #[test]
    fn configured_tokens_are_validated_and_routed() {
        let events = Events::default();
        let mut walker = TreeWalker::new();
        let err = walker
            .register(
                recorder("one", &events, &[TokenType::MethodDef]),
                &CheckSetup::new().tokens([TokenType::Slist]),
            )
            .expect_err("illegal");
        assert_eq!(
            err,
            RegistrationError::IllegalToken {
                check: "one".to_string(),
                token: "SLIST".to_string(),
            }
        );
        walker
            .register(
                recorder("one", &events, &[TokenType::MethodDef]),
                &CheckSetup::new().tokens([TokenType::ClassDef, TokenType::ClassDef]),
            )
            .expect("register");
        assert_eq!(walker.routed(TokenType::ClassDef), vec!["one"]);
        assert!(walker.routed(TokenType::MethodDef).is_empty());
    }

    #[test]
    fn ignore_severity_drops_violations_and_id_is_attached() {
        let contents = FileContents::parse("A.java", SOURCE).expect("parse");
        let mut walker = TreeWalker::new();
        walker
            .register(Box::new(Exploder), &CheckSetup::new().severity(Severity::Ignore))
            .expect("register");
        let outcome = walker.walk(&contents, 8);
        assert!(outcome.violations.is_empty());
        assert!(!outcome.faults.is_empty());

        let mut walker = TreeWalker::new();
        walker
            .register(Box::new(Exploder), &CheckSetup::new().id("boom-id"))
            .expect("register");
        let outcome = walker.walk(&contents, 8);
        assert_eq!(outcome.violations[0].module_id.as_deref(), Some("boom-id"));
        assert_eq!(outcome.violations[0].column, 3);
    }
}
