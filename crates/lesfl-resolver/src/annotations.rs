//! Annotation validation (4.5.6).
//!
//! An [`Annotation`] is only a bare name as written by a parser. The closed
//! set is `eager`/`lazy`/`memoized`/`unmemoized` plus three compounds that
//! expand to a pair before the same conflict check applies:
//! `onlyeager` = eager+unmemoized, `onlylazy` = lazy+unmemoized,
//! `onlymemoized` = eager+memoized. At most one of `{eager,lazy}` and at
//! most one of `{memoized,unmemoized}` may hold per function.

use lesfl_common::ErrorCategory;
use lesfl_syntax::{Annotation, AnnotationKind};

use crate::context::ResolverContext;

fn expand(name: &str) -> Option<&'static [AnnotationKind]> {
    use AnnotationKind::{Eager, Lazy, Memoized, Unmemoized};
    match name {
        "eager" => Some(&[Eager]),
        "lazy" => Some(&[Lazy]),
        "memoized" => Some(&[Memoized]),
        "unmemoized" => Some(&[Unmemoized]),
        "onlyeager" => Some(&[Eager, Unmemoized]),
        "onlylazy" => Some(&[Lazy, Unmemoized]),
        "onlymemoized" => Some(&[Eager, Memoized]),
        _ => None,
    }
}

pub fn validate_annotations(ctx: &mut ResolverContext, annotations: &[Annotation]) {
    let mut eagerness: Option<AnnotationKind> = None;
    let mut memoization: Option<AnnotationKind> = None;
    for annotation in annotations {
        let Some(kinds) = expand(&annotation.name) else {
            ctx.errors.push(
                ErrorCategory::AnnotationError,
                annotation.position,
                format!("unrecognized annotation {}", annotation.name),
            );
            continue;
        };
        for &kind in kinds {
            match kind {
                AnnotationKind::Eager | AnnotationKind::Lazy => {
                    if let Some(prev) = eagerness {
                        if prev != kind {
                            ctx.errors.push(
                                ErrorCategory::AnnotationError,
                                annotation.position,
                                format!(
                                    "annotation {} conflicts with an earlier eagerness annotation",
                                    annotation.name
                                ),
                            );
                        }
                    }
                    eagerness = Some(kind);
                }
                AnnotationKind::Memoized | AnnotationKind::Unmemoized => {
                    if let Some(prev) = memoization {
                        if prev != kind {
                            ctx.errors.push(
                                ErrorCategory::AnnotationError,
                                annotation.position,
                                format!(
                                    "annotation {} conflicts with an earlier memoization annotation",
                                    annotation.name
                                ),
                            );
                        }
                    }
                    memoization = Some(kind);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesfl_common::{Position, SourceId};

    fn pos() -> Position {
        Position::new(SourceId::new(0), 0, 0)
    }

    fn ann(name: &str) -> Annotation {
        Annotation {
            name: name.to_string(),
            position: pos(),
        }
    }

    #[test]
    fn conflicting_eagerness_annotations_are_reported() {
        let mut ctx = ResolverContext::new();
        validate_annotations(&mut ctx, &[ann("eager"), ann("lazy")]);
        assert!(ctx.errors.had_errors());
    }

    #[test]
    fn compatible_annotations_are_accepted() {
        let mut ctx = ResolverContext::new();
        validate_annotations(&mut ctx, &[ann("eager"), ann("memoized")]);
        assert!(!ctx.errors.had_errors());
    }

    #[test]
    fn unrecognized_annotation_is_reported() {
        let mut ctx = ResolverContext::new();
        validate_annotations(&mut ctx, &[ann("bogus")]);
        assert!(ctx.errors.had_errors());
    }

    #[test]
    fn onlylazy_conflicts_with_onlymemoized() {
        // onlylazy expands to lazy+unmemoized, onlymemoized to eager+memoized:
        // both the eagerness and memoization pair conflict.
        let mut ctx = ResolverContext::new();
        validate_annotations(&mut ctx, &[ann("onlylazy"), ann("onlymemoized")]);
        assert!(ctx.errors.had_errors());
    }

    #[test]
    fn onlyeager_alone_is_accepted() {
        let mut ctx = ResolverContext::new();
        validate_annotations(&mut ctx, &[ann("onlyeager")]);
        assert!(!ctx.errors.had_errors());
    }
}
