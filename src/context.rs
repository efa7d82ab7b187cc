//! Context Builder
//!
//! Computes the ordered lookup paths for one resolution call. Application
//! contexts come before default contexts, and within each the profiled
//! variants come before the plain one, so earlier entries are more specific.

use indexmap::IndexSet;

/// Insertion-ordered, deduplicated set of contexts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSet {
    contexts: IndexSet<String>,
}

impl ContextSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a context. Returns false if it was already present; the original
    /// position is kept.
    pub fn insert(&mut self, context: impl Into<String>) -> bool {
        self.contexts.insert(context.into())
    }

    pub fn contains(&self, context: &str) -> bool {
        self.contexts.contains(context)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.contexts.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.contexts.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a ContextSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.contexts.iter()
    }
}

impl IntoIterator for ContextSet {
    type Item = String;
    type IntoIter = indexmap::set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.contexts.into_iter()
    }
}

/// Inputs to [`build_contexts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRequest {
    /// Application name; `None` or blank skips the application contexts.
    pub app_name: Option<String>,
    pub default_context: String,
    pub prefix: String,
    pub profile_separator: String,
    /// Terminator appended to every context (`"/"` for key listing, `""` for documents).
    pub suffix: String,
}

/// Build the ordered contexts for `request` and the active `profiles`.
///
/// For application `A`, default `D`, prefix `P`, separator `_`, suffix `/`
/// and profiles `[p1, p2]` this yields
/// `P/A_p1/, P/A_p2/, P/A/, P/D_p1/, P/D_p2/, P/D/` with duplicates collapsed.
pub fn build_contexts<S: AsRef<str>>(request: &ContextRequest, profiles: &[S]) -> ContextSet {
    let mut contexts = ContextSet::new();

    if let Some(app_name) = request
        .app_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
    {
        let app_context = format!("{}/{}", request.prefix, app_name);
        add_base_context(&mut contexts, &app_context, request, profiles);
    }

    let default_context = format!("{}/{}", request.prefix, request.default_context);
    add_base_context(&mut contexts, &default_context, request, profiles);

    contexts
}

fn add_base_context<S: AsRef<str>>(
    contexts: &mut ContextSet,
    base: &str,
    request: &ContextRequest,
    profiles: &[S],
) {
    for profile in profiles {
        contexts.insert(format!(
            "{}{}{}{}",
            base,
            request.profile_separator,
            profile.as_ref(),
            request.suffix
        ));
    }
    contexts.insert(format!("{}{}", base, request.suffix));
}
