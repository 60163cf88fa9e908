//! Diesel schema for provisioning configuration persistence.

diesel::table! {
    /// One live provisioning configuration per operator account.
    provisioning_configs (operator_id) {
        /// Owning operator account.
        operator_id -> Uuid,
        /// Cloud credential identifier.
        #[max_length = 128]
        access_key_id -> Varchar,
        /// Cloud credential secret.
        #[max_length = 128]
        secret_access_key -> Varchar,
        /// Default region code.
        #[max_length = 32]
        default_region -> Varchar,
        /// Default instance size code.
        #[max_length = 32]
        default_instance_size -> Varchar,
        /// Designated security group, if any.
        #[max_length = 255]
        security_group_id -> Nullable<Varchar>,
        /// Designated key pair, if any.
        #[max_length = 255]
        key_pair_name -> Nullable<Varchar>,
        /// Whether migrations roll out by default.
        auto_rollout -> Bool,
        /// Timestamp of the most recent save.
        updated_at -> Timestamptz,
    }
}
