//! `define_port_error!`: the error shape shared by every store-backed port.
//!
//! Each store port fails in one of two ways: the connection could not be
//! obtained, or a statement failed once it ran. The macro expands to an enum
//! with `Connection` and `Query` variants carrying a message, a `thiserror`
//! display prefixed with the port label, and `connection`/`query`
//! constructors that accept anything convertible into `String` so adapters
//! can pass them straight to `map_err`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident => $label:literal;
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// The store connection could not be obtained.
            #[error("{label} connection failed: {message}", label = $label)]
            Connection { message: String },
            /// A statement failed during execution.
            #[error("{label} query failed: {message}", label = $label)]
            Query { message: String },
        }

        impl $name {
            pub fn connection(message: impl Into<String>) -> Self {
                Self::Connection {
                    message: message.into(),
                }
            }

            pub fn query(message: impl Into<String>) -> Self {
                Self::Query {
                    message: message.into(),
                }
            }

            /// Whether the failure happened before any statement ran.
            pub fn is_connection(&self) -> bool {
                matches!(self, Self::Connection { .. })
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Ledger store failures.
        pub enum LedgerPortError => "ledger store";
    }

    #[test]
    fn display_carries_the_label() {
        assert_eq!(
            LedgerPortError::query("timeout").to_string(),
            "ledger store query failed: timeout"
        );
        assert_eq!(
            LedgerPortError::connection(String::from("refused")).to_string(),
            "ledger store connection failed: refused"
        );
    }

    #[test]
    fn connection_failures_are_distinguished() {
        assert!(LedgerPortError::connection("refused").is_connection());
        assert!(!LedgerPortError::query("syntax").is_connection());
    }
}
