//! Diesel schema for deployment persistence.

diesel::table! {
    /// Dispatched deployments and their lifecycle.
    deployments (id) {
        /// Provider-assigned deployment identifier.
        id -> Uuid,
        /// Operator-chosen deployment name.
        #[max_length = 255]
        name -> Varchar,
        /// Requested region code.
        #[max_length = 32]
        region -> Varchar,
        /// Lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Append-only diagnostic log.
        deployment_log -> Array<Text>,
        /// Provider instance identifier once running.
        #[max_length = 255]
        instance_id -> Nullable<Varchar>,
        /// Public address once running.
        #[max_length = 255]
        public_address -> Nullable<Varchar>,
        /// Creation timestamp, the basis of the stale timeout.
        created_at -> Timestamptz,
        /// Latest lifecycle timestamp.
        updated_at -> Timestamptz,
    }
}
