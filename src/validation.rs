//! Task-pool validation.
//!
//! Checks structural integrity of a task pool before planning. Detects:
//! - Duplicate task ids
//! - Dependencies on ids the pool does not contain
//! - Circular dependencies
//!
//! The planner itself only asks "is this specific id complete", so the
//! cycle guard runs once here, at pool-construction time, not inside
//! the placement loop.

use std::collections::{HashMap, HashSet};

use crate::models::CareTask;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same id.
    DuplicateId,
    /// A task depends on an id that does not exist in the pool.
    UnknownDependency,
    /// The dependency graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task pool.
///
/// Checks:
/// 1. No duplicate task ids
/// 2. Every dependency id refers to a task in the pool
/// 3. No circular dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_pool(tasks: &[CareTask]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task id: {}", task.id),
            ));
        }
    }

    for task in tasks {
        for dep in &task.dependency_ids {
            if !task_ids.contains(dep.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownDependency,
                    format!("Task '{}' depends on unknown task '{}'", task.id, dep),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(tasks) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the dependency graph using DFS.
///
/// A back-edge (reaching a node currently in the recursion stack) means
/// a cycle exists.
fn detect_cycles(tasks: &[CareTask]) -> Option<ValidationError> {
    // dependency → dependents
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for task in tasks {
        for dep in &task.dependency_ids {
            adj.entry(dep.as_str()).or_default().push(task.id.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for task in tasks {
        let node = task.id.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving task '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> CareTask {
        CareTask::new(id, id, 30).unwrap()
    }

    #[test]
    fn test_valid_pool() {
        let tasks = vec![
            task("feed"),
            task("walk").with_dependency("feed"),
            task("play").with_dependency("walk"),
        ];
        assert!(validate_pool(&tasks).is_ok());
    }

    #[test]
    fn test_empty_pool() {
        assert!(validate_pool(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![task("walk"), task("walk")];
        let errors = validate_pool(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_unknown_dependency() {
        let tasks = vec![task("walk").with_dependency("ghost")];
        let errors = validate_pool(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownDependency
                && e.message.contains("ghost")));
    }

    #[test]
    fn test_cyclic_dependency() {
        // feed → walk → play → feed
        let tasks = vec![
            task("feed").with_dependency("play"),
            task("walk").with_dependency("feed"),
            task("play").with_dependency("walk"),
        ];
        let errors = validate_pool(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let tasks = vec![task("walk").with_dependency("walk")];
        let errors = validate_pool(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_chain_is_not_a_cycle() {
        let tasks = vec![
            task("a"),
            task("b").with_dependency("a"),
            task("c").with_dependency("b"),
        ];
        assert!(validate_pool(&tasks).is_ok());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let tasks = vec![
            task("walk"),
            task("walk"),
            task("play").with_dependency("ghost"),
        ];
        let errors = validate_pool(&tasks).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
