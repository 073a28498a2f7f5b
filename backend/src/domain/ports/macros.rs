//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor
//! whose parameters accept anything convertible into the field types, so
//! adapters can write `GuestRepositoryError::query("boom")`.

macro_rules! define_port_error {
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    $(
                        #[doc = concat!("`", stringify!($field), "` reported by the adapter.")]
                        $field : $ty
                    ),*
                },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant () () $( $field : $ty, )*);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SeatingPortError {
            Unreachable { message: String } => "store unreachable: {message}",
            Overbooked { seats: u32 } => "overbooked by {seats}",
            Mismatch { table: String, seats: u32 } => "table {table} holds {seats}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SeatingPortError::unreachable("timeout");
        assert_eq!(err.to_string(), "store unreachable: timeout");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = SeatingPortError::overbooked(3_u32);
        assert_eq!(err, SeatingPortError::Overbooked { seats: 3 });
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SeatingPortError::mismatch("A", 8_u32);
        assert_eq!(err.to_string(), "table A holds 8");
    }
}
