//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Return the `name` column of the lookup row.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Lifecycle of a try-on generation attempt (`tryon_statuses`).
    TryOnStatus {
        Pending = 1 => "pending",
        Completed = 2 => "completed",
        Failed = 3 => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_seed_order() {
        assert_eq!(TryOnStatus::Pending.id(), 1);
        assert_eq!(TryOnStatus::Completed.id(), 2);
        assert_eq!(StatusId::from(TryOnStatus::Failed), 3);
    }

    #[test]
    fn names_match_seed_rows() {
        assert_eq!(TryOnStatus::Completed.name(), "completed");
        assert_eq!(TryOnStatus::Failed.name(), "failed");
    }
}
