//! Macros for creating validators with minimal boilerplate.
//!
//! - [`leaf_validator!`]: a stateless leaf with a unit struct, a `Validate` impl and
//!   a factory returning one shared [`Validator`](crate::foundation::Validator)
//!
//! # Examples
//!
//! ```rust
//! use shapeguard::leaf_validator;
//! use shapeguard::render::inspect;
//! use shapeguard::value::Value;
//!
//! leaf_validator! {
//!     /// Accepts finite numbers.
//!     pub Finite => "finite";
//!     rule(value) { matches!(value, Value::Number(n) if n.is_finite()) }
//!     reason(value) { format!("Value {} is not finite", inspect(value)) }
//!     fn finite();
//! }
//!
//! assert!(finite().validate(&Value::from(1.5)));
//! assert!(!finite().validate(&Value::from(f64::NAN)));
//! assert!(finite().ptr_eq(&finite()));
//! ```

/// Creates a stateless leaf validator: unit struct, `Validate`
/// implementation, and a factory function returning a shared handle.
///
/// The `reason` block only runs when the sink collects rejections.
#[macro_export]
macro_rules! leaf_validator {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident => $descriptor:expr;
        rule($inp:ident) $rule:block
        reason($rinp:ident) $reason:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            #[allow(unused_variables)]
            fn check(
                &self,
                $inp: &$crate::value::Value,
                sink: &mut dyn $crate::foundation::RejectionSink,
            ) -> bool {
                if $rule {
                    return true;
                }
                if sink.is_collecting() {
                    let $rinp = $inp;
                    sink.reject($crate::foundation::Rejection::new($reason, $descriptor));
                }
                false
            }

            fn describe(&self) -> String {
                ::std::string::String::from($descriptor)
            }
        }

        #[must_use]
        $vis fn $factory() -> $crate::foundation::Validator {
            static SHARED: ::std::sync::LazyLock<$crate::foundation::Validator> =
                ::std::sync::LazyLock::new(|| $crate::foundation::Validator::new($name));
            SHARED.clone()
        }
    };
}
