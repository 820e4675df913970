//! Diesel table definitions for the dashboard schema.
//!
//! The schema is provisioned outside this service; these definitions must
//! match it column for column.

diesel::table! {
    /// Accounts allowed to sign in. Read-only here.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Unique sign-in address.
        email -> Text,
        /// PHC-encoded password hash.
        password -> Text,
    }
}

diesel::table! {
    customers (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        image_url -> Varchar,
    }
}

diesel::table! {
    invoices (id) {
        id -> Uuid,
        customer_id -> Uuid,
        /// Amount in cents.
        amount -> Int4,
        /// `pending` or `paid`.
        status -> Varchar,
        date -> Date,
    }
}

diesel::table! {
    revenue (month) {
        /// Short month label, unique.
        month -> Varchar,
        /// Whole currency units. Renamed because a column may not share
        /// its table's name.
        #[sql_name = "revenue"]
        amount -> Int4,
    }
}

diesel::joinable!(invoices -> customers (customer_id));

diesel::allow_tables_to_appear_in_same_query!(customers, invoices, revenue, users);
