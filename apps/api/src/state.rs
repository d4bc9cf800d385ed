use webaudit_application::AuditService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub audit_service: AuditService,
}
