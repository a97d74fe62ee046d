//! Partial-update support shared by every PATCH endpoint.

use super::errors::RoutingError;

/// A partial update whose fields are all optional.
pub trait PatchFields {
    /// Names of the fields this patch actually sets.
    fn provided_fields(&self) -> Vec<&'static str>;

    fn is_empty(&self) -> bool {
        self.provided_fields().is_empty()
    }
}

/// Rejects a patch that sets nothing, before any store access.
pub fn ensure_non_empty<P: PatchFields>(patch: &P) -> Result<(), RoutingError> {
    if patch.is_empty() {
        return Err(RoutingError::PatchEmpty);
    }
    Ok(())
}

/// Implements [`PatchFields`] for a struct of `Option` fields.
///
/// ```ignore
/// impl_patch_fields!(EventPatch { title });
/// ```
#[macro_export]
macro_rules! impl_patch_fields {
    ($patch:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::common::PatchFields for $patch {
            fn provided_fields(&self) -> Vec<&'static str> {
                let mut fields = Vec::new();
                $(
                    if self.$field.is_some() {
                        fields.push(stringify!($field));
                    }
                )+
                fields
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct LabelPatch {
        label: Option<String>,
        channel: Option<i32>,
    }

    impl_patch_fields!(LabelPatch { label, channel });

    #[test]
    fn test_empty_patch_is_rejected() {
        let err = ensure_non_empty(&LabelPatch::default()).unwrap_err();
        assert!(matches!(err, RoutingError::PatchEmpty));
    }

    #[test]
    fn test_any_field_makes_patch_non_empty() {
        let patch = LabelPatch {
            channel: Some(2),
            ..Default::default()
        };
        assert!(ensure_non_empty(&patch).is_ok());
        assert_eq!(patch.provided_fields(), vec!["channel"]);
    }
}
