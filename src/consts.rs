pub mod app_const {
    pub const USER_TABLE: &str = "users";
    pub const AUTH_PASSWORD_TABLE: &str = "auth_passwords";
    pub const GROUP_TABLE: &str = "groups";
    pub const INVITATION_TABLE: &str = "invitations";
    pub const INSTALL_REQUEST_TABLE: &str = "installRequests";

    pub const PENDING_STATUS: &str = "pending";
}
