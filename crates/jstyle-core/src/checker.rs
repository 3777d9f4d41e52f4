//! Batch processing: files in, accepted violations and faults out.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::check::{Check, CheckFactory, CheckSetup};
use crate::contents::FileContents;
use crate::filters::{BeforeExecutionFilter, Filter, FilterSet};
use crate::parser::ParseError;
use crate::types::{AuditResult, FaultKind, FileFault, Violation};
use crate::walker::{RegistrationError, TreeWalker};

/// Worker stack, sized for parsing files nested up to the parser's limit.
const WORKER_STACK_SIZE: usize = 32 << 20;

/// Errors that stop a whole run rather than one file.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// IO error outside of per-file processing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A check could not be registered.
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Directory traversal failed.
    #[error("File discovery error: {0}")]
    Discovery(#[from] ignore::Error),
}

/// Builder for configuring a [`Checker`].
pub struct CheckerBuilder {
    checks: Vec<(Box<dyn CheckFactory>, CheckSetup)>,
    filters: FilterSet,
    before_execution: Vec<Box<dyn BeforeExecutionFilter>>,
    tab_width: usize,
    file_extensions: Vec<String>,
    parallelism: Option<usize>,
    basedir: Option<PathBuf>,
    respect_gitignore: bool,
}

impl Default for CheckerBuilder {
    fn default() -> Self {
        Self {
            checks: Vec::new(),
            filters: FilterSet::new(),
            before_execution: Vec::new(),
            tab_width: 8,
            file_extensions: vec!["java".to_string()],
            parallelism: None,
            basedir: None,
            respect_gitignore: true,
        }
    }
}

impl CheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check with default settings.
    #[must_use]
    pub fn check<C: Check + Clone + Sync + 'static>(self, check: C) -> Self {
        self.check_with(check, CheckSetup::new())
    }

    /// Adds a check with explicit tokens, severity or id.
    #[must_use]
    pub fn check_with<C: Check + Clone + Sync + 'static>(mut self, check: C, setup: CheckSetup) -> Self {
        self.checks.push((Box::new(check), setup));
        self
    }

    /// Adds a boxed check prototype.
    #[must_use]
    pub fn check_factory(mut self, factory: Box<dyn CheckFactory>, setup: CheckSetup) -> Self {
        self.checks.push((factory, setup));
        self
    }

    /// Adds a violation filter.
    #[must_use]
    pub fn filter<F: Filter + 'static>(self, filter: F) -> Self {
        self.filter_box(Box::new(filter))
    }

    /// Adds a boxed violation filter.
    #[must_use]
    pub fn filter_box(mut self, filter: Box<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds a filter consulted before a file is read.
    #[must_use]
    pub fn before_execution_filter<F: BeforeExecutionFilter + 'static>(self, filter: F) -> Self {
        self.before_execution_filter_box(Box::new(filter))
    }

    /// Adds a boxed before-execution filter.
    #[must_use]
    pub fn before_execution_filter_box(mut self, filter: Box<dyn BeforeExecutionFilter>) -> Self {
        self.before_execution.push(filter);
        self
    }

    /// Sets the tab width (default: 8).
    #[must_use]
    pub fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width.max(1);
        self
    }

    /// Sets the processed file extensions (default: `java`). An empty list
    /// processes every file.
    #[must_use]
    pub fn file_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Sets the number of worker threads (default: sequential).
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Reports paths relative to `dir`.
    #[must_use]
    pub fn basedir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.basedir = Some(dir.into());
        self
    }

    /// Sets whether directory discovery honours `.gitignore` (default: true).
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Builds the checker.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Registration`] if a check rejects its
    /// configured tokens.
    pub fn build(self) -> Result<Checker, CheckerError> {
        let walker = build_walker(&self.checks)?;
        debug!(checks = walker.len(), filters = self.filters.len(), "checker built");
        Ok(Checker {
            checks: self.checks,
            walker: Mutex::new(walker),
            filters: self.filters,
            before_execution: self.before_execution,
            tab_width: self.tab_width,
            file_extensions: self.file_extensions,
            parallelism: self.parallelism,
            basedir: self.basedir,
            respect_gitignore: self.respect_gitignore,
        })
    }
}

fn build_walker(checks: &[(Box<dyn CheckFactory>, CheckSetup)]) -> Result<TreeWalker, RegistrationError> {
    let mut walker = TreeWalker::new();
    for (factory, setup) in checks {
        walker.register(factory.create(), setup)?;
    }
    Ok(walker)
}

/// One unit of work.
enum Input<'a> {
    File(&'a Path),
    Source(&'a Path, &'a str),
}

impl Input<'_> {
    fn path(&self) -> &Path {
        match self {
            Self::File(path) | Self::Source(path, _) => path,
        }
    }
}

#[derive(Default)]
struct FileReport {
    violations: Vec<Violation>,
    faults: Vec<FileFault>,
    skipped: bool,
}

/// Runs the registered checks over batches of files.
///
/// Use [`Checker::builder()`] to construct an instance.
pub struct Checker {
    checks: Vec<(Box<dyn CheckFactory>, CheckSetup)>,
    walker: Mutex<TreeWalker>,
    filters: FilterSet,
    before_execution: Vec<Box<dyn BeforeExecutionFilter>>,
    tab_width: usize,
    file_extensions: Vec<String>,
    parallelism: Option<usize>,
    basedir: Option<PathBuf>,
    respect_gitignore: bool,
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Configured tab width.
    #[must_use]
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Processes files from disk, in the given order.
    #[must_use]
    pub fn process(&self, files: &[PathBuf]) -> AuditResult {
        let inputs: Vec<_> = files.iter().map(|p| Input::File(p)).collect();
        self.run(&inputs)
    }

    /// Processes in-memory `(path, text)` pairs, in the given order.
    #[must_use]
    pub fn process_sources(&self, sources: &[(PathBuf, String)]) -> AuditResult {
        let inputs: Vec<_> = sources
            .iter()
            .map(|(path, text)| Input::Source(path, text))
            .collect();
        self.run(&inputs)
    }

    /// Discovers and processes every matching file below `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if directory traversal fails.
    pub fn check_dir(&self, root: &Path) -> Result<AuditResult, CheckerError> {
        let files = discover_files(root, &self.file_extensions, self.respect_gitignore)?;
        info!("Found {} files to check under {}", files.len(), root.display());
        Ok(self.process(&files))
    }

    fn run(&self, inputs: &[Input<'_>]) -> AuditResult {
        let threads = self.parallelism.unwrap_or(1);
        let reports = if threads > 1 && inputs.len() > 1 {
            self.run_parallel(inputs, threads)
        } else {
            let mut walker = self.walker.lock().unwrap_or_else(PoisonError::into_inner);
            inputs
                .iter()
                .map(|input| self.process_one(&mut walker, input))
                .collect()
        };

        let mut result = AuditResult::new();
        for report in reports {
            if report.skipped {
                result.files_skipped += 1;
                continue;
            }
            result.files_checked += 1;
            result.violations.extend(report.violations);
            result.faults.extend(report.faults);
        }

        info!(
            "Audit complete: {} violations, {} faults in {} files ({} skipped)",
            result.violations.len(),
            result.faults.len(),
            result.files_checked,
            result.files_skipped
        );
        result
    }

    /// Each worker owns a walker with its own check instances.
    fn run_parallel(&self, inputs: &[Input<'_>], threads: usize) -> Vec<FileReport> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .stack_size(WORKER_STACK_SIZE)
            .build();
        let pool = match pool {
            Ok(pool) => pool,
            Err(err) => {
                warn!("Falling back to sequential processing: {err}");
                let mut walker = self.walker.lock().unwrap_or_else(PoisonError::into_inner);
                return inputs
                    .iter()
                    .map(|input| self.process_one(&mut walker, input))
                    .collect();
            }
        };
        pool.install(|| {
            inputs
                .par_iter()
                .map_init(
                    || {
                        build_walker(&self.checks).unwrap_or_else(|err| {
                            warn!("Worker runs without checks: {err}");
                            TreeWalker::new()
                        })
                    },
                    |walker, input| self.process_one(walker, input),
                )
                .collect()
        })
    }

    fn process_one(&self, walker: &mut TreeWalker, input: &Input<'_>) -> FileReport {
        let path = input.path();
        if !self.accepts_extension(path) {
            debug!("Skipping by extension: {}", path.display());
            return FileReport {
                skipped: true,
                ..FileReport::default()
            };
        }
        if let Some(filter) = self.before_execution.iter().position(|f| !f.accept(path)) {
            debug!(filter, "Excluded before execution: {}", path.display());
            return FileReport {
                skipped: true,
                ..FileReport::default()
            };
        }

        let shown = self.display_path(path);
        let text = match input {
            Input::Source(_, text) => (*text).to_string(),
            Input::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    warn!("Failed to read {}: {}", path.display(), err);
                    return FileReport {
                        faults: vec![FileFault::new(shown, FaultKind::Io, err.to_string())],
                        ..FileReport::default()
                    };
                }
            },
        };

        debug!("Checking: {}", shown.display());
        let contents = match FileContents::parse(&shown, text) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("Failed to parse {}: {}", shown.display(), err);
                return FileReport {
                    faults: vec![parse_fault(shown, &err)],
                    ..FileReport::default()
                };
            }
        };

        let outcome = walker.walk(&contents, self.tab_width);
        let mut violations = self.filters.apply(&contents, self.tab_width, outcome.violations);
        violations.sort_by(|a, b| {
            (a.line, a.column, &a.check).cmp(&(b.line, b.column, &b.check))
        });
        let faults = outcome
            .faults
            .into_iter()
            .map(|f| {
                FileFault::new(&shown, FaultKind::Check, f.message)
                    .at(f.line, f.column)
                    .in_check(f.check)
            })
            .collect();
        FileReport {
            violations,
            faults,
            skipped: false,
        }
    }

    fn accepts_extension(&self, path: &Path) -> bool {
        self.file_extensions.is_empty()
            || path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.file_extensions.iter().any(|e| e == ext))
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        self.basedir
            .as_ref()
            .and_then(|base| path.strip_prefix(base).ok())
            .map_or_else(|| path.to_path_buf(), Path::to_path_buf)
    }
}

impl std::fmt::Debug for Checker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checker")
            .field("checks", &self.checks.len())
            .field("filters", &self.filters)
            .field("tab_width", &self.tab_width)
            .field("file_extensions", &self.file_extensions)
            .field("parallelism", &self.parallelism)
            .field("basedir", &self.basedir)
            .finish_non_exhaustive()
    }
}

fn parse_fault(path: PathBuf, err: &ParseError) -> FileFault {
    match err {
        ParseError::Lexical(e) => {
            FileFault::new(path, FaultKind::Lexical, e.kind.to_string()).at(e.line, e.column + 1)
        }
        ParseError::Syntax(e) => FileFault::new(
            path,
            FaultKind::Syntax,
            format!("expected {} but found {:?}", e.expected, e.found),
        )
        .at(e.line, e.column + 1),
    }
}

/// Lists the files below `root` with one of `extensions` (all files when
/// empty), sorted by path.
///
/// # Errors
///
/// Returns an error if directory traversal fails.
pub fn discover_files(
    root: &Path,
    extensions: &[String],
    respect_gitignore: bool,
) -> Result<Vec<PathBuf>, CheckerError> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(respect_gitignore)
        .git_exclude(respect_gitignore)
        .ignore(respect_gitignore);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = extensions.is_empty()
            || path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e == ext));
        if matches {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckContext, CheckResult};
    use crate::filters::BeforeExecutionExclusionFileFilter;
    use crate::token_types::TokenType;
    use crate::tree::Node;

    #[derive(Clone, Default)]
    struct CountMethods {
        seen: usize,
    }

    impl Check for CountMethods {
        fn name(&self) -> &'static str {
            "CountMethods"
        }

        fn default_tokens(&self) -> &'static [TokenType] {
            &[TokenType::MethodDef]
        }

        fn begin_tree(&mut self, _: &mut CheckContext<'_>, _: Node<'_, TokenType>) -> CheckResult {
            self.seen = 0;
            Ok(())
        }

        fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
            self.seen += 1;
            ctx.log(node, "method.count", format!("method #{}", self.seen));
            Ok(())
        }
    }

    fn sources() -> Vec<(PathBuf, String)> {
        vec![
            (PathBuf::from("src/A.java"), "class A { void a() {} void b() {} }".to_string()),
            (PathBuf::from("src/B.java"), "class B { void c() {} }".to_string()),
            (PathBuf::from("src/C.java"), "class C { void d( }".to_string()),
            (PathBuf::from("README.md"), "# readme".to_string()),
        ]
    }

    #[test]
    fn per_file_state_is_reset_and_faults_recorded() {
        let checker = Checker::builder()
            .check(CountMethods::default())
            .basedir("src")
            .build()
            .expect("build");
        let result = checker.process_sources(&sources());

        let messages: Vec<_> = result
            .violations
            .iter()
            .map(|v| (v.file.display().to_string(), v.message.clone()))
            .collect();
        assert_eq!(
            messages,
            vec![
                ("A.java".to_string(), "method #1".to_string()),
                ("A.java".to_string(), "method #2".to_string()),
                ("B.java".to_string(), "method #1".to_string()),
            ]
        );
        assert_eq!(result.files_checked, 3);
        assert_eq!(result.files_skipped, 1);
        assert_eq!(result.faults.len(), 1);
        assert_eq!(result.faults[0].kind, FaultKind::Syntax);
        assert_eq!(result.faults[0].file, PathBuf::from("C.java"));
    }

    #[test]
    fn parallel_run_matches_sequential_run() {
        let sequential = Checker::builder()
            .check(CountMethods::default())
            .build()
            .expect("build")
            .process_sources(&sources());
        let parallel = Checker::builder()
            .check(CountMethods::default())
            .parallelism(3)
            .build()
            .expect("build")
            .process_sources(&sources());
        assert_eq!(sequential.violations, parallel.violations);
        assert_eq!(sequential.faults, parallel.faults);
    }

    #[test]
    fn overly_nested_file_is_a_fault_for_that_file_only() {
        let depth = 10_000;
        let deep = format!("class D {{ int x = {}1{}; }}", "(".repeat(depth), ")".repeat(depth));
        let mut inputs = sources();
        inputs.insert(0, (PathBuf::from("src/D.java"), deep));

        let parallel = Checker::builder()
            .check(CountMethods::default())
            .parallelism(2)
            .build()
            .expect("build")
            .process_sources(&inputs);
        let sequential = std::thread::Builder::new()
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || {
                Checker::builder()
                    .check(CountMethods::default())
                    .build()
                    .expect("build")
                    .process_sources(&inputs)
            })
            .expect("spawn")
            .join()
            .expect("join");

        for result in [parallel, sequential] {
            let syntax: Vec<_> = result.faults_of(FaultKind::Syntax).iter().map(|f| f.file.clone()).collect();
            assert_eq!(syntax, [PathBuf::from("src/D.java"), PathBuf::from("src/C.java")]);
            assert_eq!(result.violations.len(), 3);
            assert_eq!(result.files_checked, 4);
        }
    }

    #[test]
    fn before_execution_filter_skips_files() {
        let checker = Checker::builder()
            .check(CountMethods::default())
            .before_execution_filter(
                BeforeExecutionExclusionFileFilter::new(r"B\.java$").expect("filter"),
            )
            .build()
            .expect("build");
        let result = checker.process_sources(&sources());
        assert!(result.violations.iter().all(|v| !v.file.ends_with("B.java")));
        assert_eq!(result.files_skipped, 2);
    }

    #[test]
    fn missing_file_is_an_io_fault() {
        let checker = Checker::builder().build().expect("build");
        let result = checker.process(&[PathBuf::from("/definitely/not/here/X.java")]);
        assert_eq!(result.faults.len(), 1);
        assert_eq!(result.faults[0].kind, FaultKind::Io);
    }

    #[test]
    fn illegal_tokens_fail_the_build() {
        let err = Checker::builder()
            .check_with(
                CountMethods::default(),
                CheckSetup::new().tokens([TokenType::ClassDef]),
            )
            .build()
            .expect_err("illegal token");
        assert!(matches!(err, CheckerError::Registration(_)));
    }

    #[test]
    fn discovery_filters_by_extension_and_sorts() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("pkg")).expect("mkdir");
        std::fs::write(dir.path().join("pkg/B.java"), "class B {}").expect("write");
        std::fs::write(dir.path().join("A.java"), "class A {}").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "x").expect("write");
        let files = discover_files(dir.path(), &["java".to_string()], true).expect("discover");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).expect("prefix").to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("A.java"), PathBuf::from("pkg/B.java")]);
    }
}
