//! Application Context
//!
//! Shared state provided via Leptos Context API. `AppContext` is the single
//! writer of the store: views call its intent methods and never touch the
//! store or the network themselves.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, NewTask, Registration, ScriptClient};
use crate::error::ApiError;
use crate::models::{AuditLogEntry, LogAction, Role, Task, TaskStatus, User, UserUpdates};
use crate::station::StationScope;
use crate::store::*;

/// Dismissible message shown by the notice banner
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }
}

/// Today in the browser's local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// App-wide signals and intents provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    client: StoredValue<ScriptClient, LocalStorage>,
    /// Current notice - read
    pub notice: ReadSignal<Option<Notice>>,
    /// Current notice - write
    set_notice: WriteSignal<Option<Notice>>,
    /// A write is in flight (forms disable their submit button) - read
    pub busy: ReadSignal<bool>,
    /// A write is in flight - write
    set_busy: WriteSignal<bool>,
    /// Task fetch in flight - read
    pub loading: ReadSignal<bool>,
    /// Task fetch in flight - write
    set_loading: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(
        store: AppStore,
        client: ScriptClient,
        notice: (ReadSignal<Option<Notice>>, WriteSignal<Option<Notice>>),
        busy: (ReadSignal<bool>, WriteSignal<bool>),
        loading: (ReadSignal<bool>, WriteSignal<bool>),
    ) -> Self {
        Self {
            store,
            client: StoredValue::new_local(client),
            notice: notice.0,
            set_notice: notice.1,
            busy: busy.0,
            set_busy: busy.1,
            loading: loading.0,
            set_loading: loading.1,
        }
    }

    fn client(&self) -> ScriptClient {
        self.client.get_value()
    }

    // ========================
    // Session accessors
    // ========================

    pub fn session(&self) -> Option<User> {
        self.store.session().get()
    }

    pub fn role(&self) -> Option<Role> {
        self.store.session().with(|s| s.as_ref().map(|u| u.role))
    }

    /// Station scope of the signed-in user; nothing is visible without a session
    pub fn scope(&self) -> StationScope {
        self.store
            .session()
            .with(|s| s.as_ref().map_or(StationScope::Unassigned, |u| u.assigned_station))
    }

    fn session_email(&self) -> String {
        self.store
            .session()
            .with_untracked(|s| s.as_ref().map(|u| u.email.clone()).unwrap_or_default())
    }

    // ========================
    // Notices
    // ========================

    pub fn notify(&self, notice: Notice) {
        self.set_notice.set(Some(notice));
    }

    pub fn dismiss_notice(&self) {
        self.set_notice.set(None);
    }

    fn fail(&self, action: &str, err: ApiError) {
        log::error!("[APP] {} failed: {}", action, err);
        self.notify(Notice::error(err.to_string()));
    }

    // ========================
    // Audit log
    // ========================

    /// Append to the session log and send `writeLog` without waiting on it
    pub fn record(&self, action: LogAction, details: impl Into<String>, task_uid: Option<String>) {
        self.record_as(&self.session_email(), action, details, task_uid);
    }

    fn record_as(&self, user_email: &str, action: LogAction, details: impl Into<String>, task_uid: Option<String>) {
        let entry = AuditLogEntry::new(user_email, action, details, task_uid);
        store_append_log(&self.store, entry.clone());
        let client = self.client();
        spawn_local(async move {
            if let Err(e) = commands::write_log(&client, &entry).await {
                log::warn!("[APP] writeLog failed: {}", e);
            }
        });
    }

    // ========================
    // Account intents
    // ========================

    pub fn login(&self, email: String, password: String) {
        if email.trim().is_empty() || password.is_empty() {
            self.notify(Notice::error("請輸入帳號與密碼"));
            return;
        }
        let ctx = *self;
        let client = self.client();
        ctx.set_busy.set(true);
        spawn_local(async move {
            let result = commands::authenticate(&client, &email, &password).await;
            ctx.set_busy.set(false);
            match result {
                Ok(user) => {
                    if let Some(reason) = user.sign_in_refusal() {
                        log::warn!("[APP] sign-in refused for {}: {}", user.email, reason);
                        ctx.notify(Notice::error(reason));
                        return;
                    }
                    log::info!("[APP] signed in as {} ({})", user.email, user.role.as_wire());
                    let is_admin = user.role.can_administer();
                    store_set_session(&ctx.store, Some(user));
                    ctx.dismiss_notice();
                    ctx.record(LogAction::Login, "登入系統", None);
                    ctx.refresh_tasks();
                    if is_admin {
                        ctx.refresh_users();
                    }
                }
                Err(e) => ctx.fail("login", e),
            }
        });
    }

    pub fn logout(&self) {
        log::info!("[APP] signed out");
        store_clear(&self.store);
        self.dismiss_notice();
    }

    /// Registration checks the current account list for the e-mail first.
    pub fn register(&self, registration: Registration, on_done: Callback<()>) {
        if registration.name.trim().is_empty()
            || registration.email.trim().is_empty()
            || registration.organization.trim().is_empty()
        {
            self.notify(Notice::error("請填寫姓名、Email 與單位"));
            return;
        }
        let registration = Registration {
            name: registration.name.trim().to_string(),
            email: commands::normalize_email(&registration.email),
            organization: registration.organization.trim().to_string(),
        };
        let ctx = *self;
        let client = self.client();
        ctx.set_busy.set(true);
        spawn_local(async move {
            let result = async {
                let users = commands::fetch_users(&client).await?;
                if users.iter().any(|u| u.has_email(&registration.email)) {
                    return Err(ApiError::Rejected("此 Email 已被註冊".to_string()));
                }
                commands::register_user(&client, &registration).await
            }
            .await;
            ctx.set_busy.set(false);
            match result {
                Ok(()) => {
                    ctx.record_as(&registration.email, LogAction::Register, format!("{} 申請帳號（{}）", registration.name, registration.organization), None);
                    ctx.notify(Notice::success("申請已送出，請等待管理員審核"));
                    on_done.run(());
                }
                Err(e) => ctx.fail("register", e),
            }
        });
    }

    pub fn request_reset(&self, email: String, on_done: Callback<()>) {
        if email.trim().is_empty() {
            self.notify(Notice::error("請輸入 Email"));
            return;
        }
        let ctx = *self;
        let client = self.client();
        ctx.set_busy.set(true);
        spawn_local(async move {
            let result = commands::request_password_reset(&client, &email).await;
            ctx.set_busy.set(false);
            match result {
                Ok(()) => {
                    log::info!("[APP] password reset requested for {}", email);
                    ctx.record_as(&commands::normalize_email(&email), LogAction::ResetPasswordRequest, "申請重設密碼", None);
                    ctx.notify(Notice::success("已送出重設密碼請求，請留意信箱"));
                    on_done.run(());
                }
                Err(e) => ctx.fail("resetPasswordRequest", e),
            }
        });
    }

    /// Clears the force-change flag locally on success
    pub fn change_password(&self, new_password: String, on_done: Callback<()>) {
        let email = self.session_email();
        if email.is_empty() {
            return;
        }
        let ctx = *self;
        let client = self.client();
        ctx.set_busy.set(true);
        spawn_local(async move {
            let result = commands::change_password(&client, &email, &new_password).await;
            ctx.set_busy.set(false);
            match result {
                Ok(()) => {
                    ctx.store.session().update(|s| {
                        if let Some(user) = s {
                            user.force_change_password = false;
                        }
                    });
                    ctx.record(LogAction::ChangePassword, "修改密碼", None);
                    ctx.notify(Notice::success("密碼已更新"));
                    on_done.run(());
                }
                Err(e) => ctx.fail("changePassword", e),
            }
        });
    }

    // ========================
    // Task intents
    // ========================

    /// Full task refetch for the session's scope
    pub fn refresh_tasks(&self) {
        let scope = self.store.session().with_untracked(|s| s.as_ref().map_or(StationScope::Unassigned, |u| u.assigned_station));
        let ctx = *self;
        let client = self.client();
        ctx.set_loading.set(true);
        spawn_local(async move {
            let result = commands::fetch_tasks(&client, scope).await;
            ctx.set_loading.set(false);
            match result {
                Ok(tasks) => {
                    log::debug!("[APP] loaded {} tasks for {}", tasks.len(), scope.label());
                    store_set_tasks(&ctx.store, tasks);
                }
                Err(e) => ctx.fail("getTasks", e),
            }
        });
    }

    pub fn update_task_status(&self, task: Task, status: TaskStatus, attachment_url: String, on_done: Callback<()>) {
        let ctx = *self;
        let client = self.client();
        ctx.set_busy.set(true);
        spawn_local(async move {
            let result = commands::update_task_status(&client, &task.uid, &status, &attachment_url).await;
            ctx.settle_task_update(&task, &status, &attachment_url, result, on_done);
        });
    }

    /// Apply the outcome of `updateTaskStatus`. A failure leaves the task list
    /// as it was and shows the error text.
    fn settle_task_update(&self, task: &Task, status: &TaskStatus, attachment_url: &str, result: Result<(), ApiError>, on_done: Callback<()>) {
        self.set_busy.set(false);
        match result {
            Ok(()) => {
                let uid = Some(task.uid.clone());
                self.record(
                    LogAction::UpdateStatus,
                    format!("{} {} → {}", task.item_name, task.status.as_wire(), status.as_wire()),
                    uid.clone(),
                );
                let attachment_url = attachment_url.trim();
                if !attachment_url.is_empty() && task.attachment_url.as_deref() != Some(attachment_url) {
                    self.record(LogAction::UploadFile, format!("{} 附件：{}", task.item_name, attachment_url), uid);
                }
                self.notify(Notice::success("進度已更新"));
                on_done.run(());
                self.refresh_tasks();
            }
            Err(e) => self.fail("updateTaskStatus", e),
        }
    }

    pub fn create_task(&self, task: NewTask, on_done: Callback<()>) {
        if !self.role().is_some_and(Role::can_create_tasks) {
            self.notify(Notice::error("您沒有新增工項的權限"));
            return;
        }
        let ctx = *self;
        let client = self.client();
        ctx.set_busy.set(true);
        spawn_local(async move {
            let result = commands::create_task(&client, &task).await;
            ctx.set_busy.set(false);
            match result {
                Ok(()) => {
                    let stations: Vec<&str> = task.station_codes.iter().map(|s| s.code()).collect();
                    ctx.record(
                        LogAction::CreateTask,
                        format!("{}（{}）截止 {}", task.item_name, stations.join(","), task.deadline),
                        None,
                    );
                    ctx.notify(Notice::success("工項已新增"));
                    on_done.run(());
                    ctx.refresh_tasks();
                }
                Err(e) => ctx.fail("createNewTask", e),
            }
        });
    }

    // ========================
    // User administration intents
    // ========================

    pub fn refresh_users(&self) {
        let ctx = *self;
        let client = self.client();
        spawn_local(async move {
            match commands::fetch_users(&client).await {
                Ok(users) => store_set_users(&ctx.store, users),
                Err(e) => ctx.fail("getUsers", e),
            }
        });
    }

    pub fn approve_user(&self, email: String, role: Role, scope: StationScope) {
        let updates = UserUpdates {
            role: Some(role),
            assigned_station: Some(scope),
            is_active: Some(true),
        };
        let details = format!("核准 {}：{} / {}", email, role.as_wire(), scope.label());
        self.write_user(email, updates, Some((LogAction::ApproveUser, details)));
    }

    /// Inline role / station / active edits from the users table
    pub fn update_user(&self, email: String, updates: UserUpdates) {
        self.write_user(email, updates, None);
    }

    fn write_user(&self, email: String, updates: UserUpdates, log_entry: Option<(LogAction, String)>) {
        if !self.role().is_some_and(Role::can_administer) {
            return;
        }
        let ctx = *self;
        let client = self.client();
        spawn_local(async move {
            match commands::update_user(&client, &email, &updates).await {
                Ok(()) => {
                    store_update_user(&ctx.store, &email, &updates);
                    if let Some((action, details)) = log_entry {
                        ctx.record(action, details, None);
                    }
                    ctx.notify(Notice::success("使用者資料已更新"));
                }
                Err(e) => ctx.fail("updateUser", e),
            }
        });
    }

    /// Reject a pending account or hard-delete an existing one
    pub fn delete_user(&self, email: String) {
        if !self.role().is_some_and(Role::can_administer) {
            return;
        }
        if self.session_email().eq_ignore_ascii_case(&email) {
            self.notify(Notice::error("無法刪除目前登入的帳號"));
            return;
        }
        let ctx = *self;
        let client = self.client();
        spawn_local(async move {
            match commands::delete_user(&client, &email).await {
                Ok(()) => {
                    store_remove_user(&ctx.store, &email);
                    ctx.record(LogAction::Delete, format!("刪除使用者 {}", email), None);
                    ctx.notify(Notice::success("使用者已刪除"));
                }
                Err(e) => ctx.fail("deleteUser", e),
            }
        });
    }
}
