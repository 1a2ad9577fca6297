use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    foundation::error::{QuadError, QuadResult},
    foundation::time::Timestamp,
    quad::source::{QuadDatum, QuadStyle},
};

static NEXT_FEATURE_ID: AtomicU64 = AtomicU64::new(0);

/// Observable lifecycle state of a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Constructed, `init` not called yet.
    Uninitialized,
    /// Initialized and up to date.
    Idle,
    /// Initialized but never built, or changed since the last build; the next `update` rebuilds.
    Stale,
    /// Torn down. Terminal.
    Exited,
}

/// Arguments a feature is initialized with.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeatureArgs {
    /// Feature id; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Class attached to drawn elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Defaults for data that does not set its own style.
    #[serde(default)]
    pub style: QuadStyle,
    /// Quad data.
    #[serde(default)]
    pub data: Vec<QuadDatum>,
}

impl FeatureArgs {
    /// Validate ids, class names and numeric style values.
    pub fn validate(&self) -> QuadResult<()> {
        if let Some(id) = &self.id {
            validate_id(id)?;
        }
        if let Some(class) = &self.class {
            validate_name("feature class", class)?;
        }
        if !self.style.opacity.is_finite() {
            return Err(QuadError::validation("style opacity must be finite"));
        }
        for (idx, d) in self.data.iter().enumerate() {
            if d.opacity.is_some_and(|o| !o.is_finite()) {
                return Err(QuadError::validation(format!(
                    "data[{idx}] opacity must be finite"
                )));
            }
            let corners = [d.ul, d.ur, d.ll, d.lr];
            if corners.iter().flatten().any(|c| !c.is_finite()) {
                return Err(QuadError::validation(format!(
                    "data[{idx}] corners must be finite"
                )));
            }
        }
        Ok(())
    }
}

fn validate_name(what: &str, s: &str) -> QuadResult<()> {
    if s.trim().is_empty() {
        return Err(QuadError::validation(format!("{what} must be non-empty")));
    }
    if s.chars().any(char::is_whitespace) {
        return Err(QuadError::validation(format!(
            "{what} '{s}' must not contain whitespace"
        )));
    }
    Ok(())
}

/// Feature ids become SVG element ids and `url(#...)` pattern references, so they are limited to
/// an XML-name-safe subset: a letter or `_` first, then letters, digits, `_`, `-` or `.`.
fn validate_id(id: &str) -> QuadResult<()> {
    validate_name("feature id", id)?;
    let mut chars = id.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !(first_ok && rest_ok) {
        return Err(QuadError::validation(format!(
            "feature id '{id}' must start with a letter or '_' and contain only letters, digits, '_', '-' or '.'"
        )));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Active,
    Exited,
}

/// State shared by every feature: identity, phase and modification times.
///
/// A feature is stale when it was never built, when its data changed at or after the last build,
/// or when the feature itself was modified after it.
#[derive(Clone, Debug)]
pub struct FeatureBase {
    id: String,
    phase: Phase,
    modified_time: Timestamp,
    data_time: Timestamp,
    build_time: Timestamp,
    update_time: Timestamp,
}

impl Default for FeatureBase {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureBase {
    /// Uninitialized base with no id.
    pub fn new() -> Self {
        Self {
            id: String::new(),
            phase: Phase::Uninitialized,
            modified_time: Timestamp::NEVER,
            data_time: Timestamp::NEVER,
            build_time: Timestamp::NEVER,
            update_time: Timestamp::NEVER,
        }
    }

    /// Feature id; empty until `init`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Base initialization: take the id, stamp data and modification times, clear the build.
    pub fn init(&mut self, args: &FeatureArgs) -> QuadResult<()> {
        match self.phase {
            Phase::Uninitialized => {}
            Phase::Active => {
                return Err(QuadError::lifecycle(format!(
                    "feature '{}' is already initialized",
                    self.id
                )));
            }
            Phase::Exited => return Err(QuadError::lifecycle("cannot init an exited feature")),
        }
        args.validate()?;

        self.id = match &args.id {
            Some(id) => id.clone(),
            None => format!(
                "quad-feature-{}",
                NEXT_FEATURE_ID.fetch_add(1, Ordering::Relaxed)
            ),
        };
        self.modified_time.modified();
        self.data_time.modified();
        self.build_time = Timestamp::NEVER;
        self.update_time = Timestamp::NEVER;
        self.phase = Phase::Active;
        tracing::debug!(feature = %self.id, "feature initialized");
        Ok(())
    }

    /// Base update hook: stamp the update time.
    pub fn update(&mut self) -> QuadResult<()> {
        self.ensure_active("update")?;
        self.update_time.modified();
        Ok(())
    }

    /// Base teardown. Calling it again is a no-op.
    pub fn exit(&mut self) -> QuadResult<()> {
        if self.phase != Phase::Exited {
            tracing::debug!(feature = %self.id, "feature exited");
            self.phase = Phase::Exited;
        }
        Ok(())
    }

    /// Fail with [`QuadError::Lifecycle`] unless the feature is initialized and not exited.
    pub fn ensure_active(&self, op: &str) -> QuadResult<()> {
        match self.phase {
            Phase::Active => Ok(()),
            Phase::Uninitialized => Err(QuadError::lifecycle(format!(
                "{op} called before init"
            ))),
            Phase::Exited => Err(QuadError::lifecycle(format!(
                "{op} called on exited feature '{}'",
                self.id
            ))),
        }
    }

    /// Return `true` between `init` and `exit`.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Rebuild predicate: `build_time <= data_time || build_time < modified_time`.
    pub fn is_stale(&self) -> bool {
        self.build_time <= self.data_time || self.build_time < self.modified_time
    }

    /// Current lifecycle state.
    ///
    /// Derived from [`FeatureBase::is_stale`], so a feature reports `Stale` right after `init`
    /// and `Idle` only once a build has succeeded.
    pub fn state(&self) -> LifecycleState {
        match self.phase {
            Phase::Uninitialized => LifecycleState::Uninitialized,
            Phase::Exited => LifecycleState::Exited,
            Phase::Active if self.is_stale() => LifecycleState::Stale,
            Phase::Active => LifecycleState::Idle,
        }
    }

    /// Mark the feature itself as modified.
    pub fn modified(&mut self) {
        self.modified_time.modified();
    }

    /// Mark the feature's data as modified.
    pub fn data_modified(&mut self) {
        self.data_time.modified();
    }

    /// Record a successful build.
    pub fn built(&mut self) {
        self.build_time.modified();
    }

    /// Last feature modification.
    pub fn modified_time(&self) -> Timestamp {
        self.modified_time
    }

    /// Last data modification.
    pub fn data_time(&self) -> Timestamp {
        self.data_time
    }

    /// Last successful build; [`Timestamp::NEVER`] before the first.
    pub fn build_time(&self) -> Timestamp {
        self.build_time
    }

    /// Last `update` call.
    pub fn update_time(&self) -> Timestamp {
        self.update_time
    }
}

#[cfg(test)]
#[path = "../../tests/unit/feature/base.rs"]
mod tests;
