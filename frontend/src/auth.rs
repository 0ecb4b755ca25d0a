//! 认证模块
//!
//! 持有客户端核心的服务实例（会话、API、权限、认证流程），并把它们的状态
//! 同步为 Leptos 信号。路由服务通过注入的认证信号检查登录态。

use std::rc::Rc;

use housekeeper_client::{
    ApiClient, AuthFlow, ClientConfig, ClientError, ClientResult, Credentials, LoginOutcome,
    PermissionService, PermissionState, SessionManager, SessionSnapshot,
};
use housekeeper_shared::guard::GuardState;
use housekeeper_shared::validation::FieldError;
use housekeeper_shared::{Language, PermissionSet, RoleKind, RoleOption, keys};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::web::{BrowserStore, FetchHttpClient, on_storage_change};

pub type Api = ApiClient<FetchHttpClient, BrowserStore>;
pub type Permissions = PermissionService<FetchHttpClient, BrowserStore>;
type Flow = AuthFlow<FetchHttpClient, BrowserStore>;

struct Services {
    api: Rc<Api>,
    permissions: Rc<Permissions>,
    flow: Rc<Flow>,
}

/// 等待用户选择角色的登录
#[derive(Clone, Debug, PartialEq)]
pub struct PendingLogin {
    pub credentials: Credentials,
    pub options: Vec<RoleOption>,
    /// 登录后返回的地址
    pub redirect: Option<String>,
}

/// 认证上下文
///
/// 全部字段都是 `Copy` 的句柄，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话快照（只读）
    pub session: ReadSignal<SessionSnapshot>,
    set_session: WriteSignal<SessionSnapshot>,
    pub permissions: ReadSignal<PermissionState>,
    /// 登录流程进行中：权限就绪前不触发路由跳转
    signing_in: RwSignal<bool>,
    pub pending_login: RwSignal<Option<PendingLogin>>,
    /// 登录页顶部的提示（如会话过期）
    pub notice: RwSignal<Option<String>>,
    pub language: RwSignal<Language>,
    services: StoredValue<Services, LocalStorage>,
}

impl AuthContext {
    pub fn new(config: ClientConfig) -> Self {
        let manager = Rc::new(SessionManager::new(BrowserStore));
        let default_language = config.default_language;
        let api = Rc::new(ApiClient::new(config, FetchHttpClient, manager.clone()));
        let permissions = Rc::new(PermissionService::new(api.clone()));
        let flow = Rc::new(AuthFlow::new(api.clone(), permissions.clone()));

        let (session, set_session) = signal(manager.snapshot());
        let (permission_state, set_permissions) = signal(permissions.state());
        let notice = RwSignal::new(None);

        // 服务是状态的唯一持有者，信号只是它们的镜像
        manager.subscribe(move |snapshot| set_session.set(snapshot.clone()));
        permissions.subscribe(move |state| set_permissions.set(state.clone()));
        api.on_session_expired(move || {
            notice.set(Some(
                "Your session has expired. Please sign in again.".to_string(),
            ));
        });

        Self {
            session,
            set_session,
            permissions: permission_state,
            signing_in: RwSignal::new(false),
            pending_login: RwSignal::new(None),
            notice,
            language: RwSignal::new(manager.language(default_language)),
            services: StoredValue::new_local(Services {
                api,
                permissions,
                flow,
            }),
        }
    }

    pub fn api(&self) -> Rc<Api> {
        self.services.with_value(|s| s.api.clone())
    }

    fn permission_service(&self) -> Rc<Permissions> {
        self.services.with_value(|s| s.permissions.clone())
    }

    fn flow(&self) -> Rc<Flow> {
        self.services.with_value(|s| s.flow.clone())
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        let signing_in = self.signing_in;
        Signal::derive(move || session.get().is_authenticated && !signing_in.get())
    }

    pub fn role(&self) -> Signal<Option<RoleKind>> {
        let session = self.session;
        Signal::derive(move || session.get().role)
    }

    /// 当前权限集合；未就绪时为空
    pub fn permission_set(&self) -> Signal<PermissionSet> {
        let permissions = self.permissions;
        Signal::derive(move || match permissions.get() {
            PermissionState::Ready(set) => set,
            _ => PermissionSet::default(),
        })
    }

    pub fn guard_state(&self) -> Signal<GuardState> {
        let session = self.session;
        let permissions = self.permissions;
        Signal::derive(move || {
            let snapshot = session.get();
            let state = permissions.get();
            GuardState {
                is_loading: snapshot.is_authenticated && !state.is_settled(),
                is_authenticated: snapshot.is_authenticated,
                role: snapshot.role,
                permissions: match state {
                    PermissionState::Ready(set) => set,
                    _ => PermissionSet::default(),
                },
            }
        })
    }

    pub fn set_language(&self, language: Language) {
        self.api().session().set_language(language);
        self.language.set(language);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 页面刷新后会话仍在时加载权限（优先使用会话缓存），并监听其他标签页的登录/登出。
pub fn init_auth(ctx: &AuthContext) {
    if ctx.session.get_untracked().is_authenticated {
        let permissions = ctx.permission_service();
        spawn_local(async move {
            permissions.load().await;
        });
    }

    let ctx = *ctx;
    on_storage_change(move |key| match key.as_deref() {
        Some(keys::LANGUAGE) => {
            let api = ctx.api();
            ctx.language
                .set(api.session().language(api.config().default_language));
        }
        // userData 是登录时最后写入、登出时较晚删除的键；`None` 表示整个存储被清空
        Some(keys::USER_DATA) | None => {
            log::info!("[Auth] session changed in another tab, resyncing");
            ctx.set_session.set(ctx.api().session().snapshot());
            let permissions = ctx.permission_service();
            spawn_local(async move {
                permissions.resync().await;
            });
        }
        Some(_) => {}
    });
}

/// 登录第一步：查询角色；单角色时直接完成登录（权限就绪后返回）
pub async fn login(
    ctx: AuthContext,
    credentials: Credentials,
    redirect: Option<String>,
) -> ClientResult<LoginOutcome> {
    ctx.signing_in.set(true);
    ctx.notice.set(None);

    let result = ctx.flow().begin_login(&credentials).await;
    if let Ok(LoginOutcome::ChooseRole(options)) = &result {
        ctx.pending_login.set(Some(PendingLogin {
            credentials,
            options: options.clone(),
            redirect,
        }));
    }

    ctx.signing_in.set(false);
    result
}

/// 多角色账户选择角色后完成登录
pub async fn choose_role(ctx: AuthContext, role: RoleKind) -> ClientResult<SessionSnapshot> {
    let Some(pending) = ctx.pending_login.get_untracked() else {
        return Err(ClientError::validation(vec![FieldError::new(
            "role",
            "Sign in again to choose a role",
        )]));
    };

    ctx.signing_in.set(true);
    let result = ctx.flow().login_with_role(&pending.credentials, role).await;
    if result.is_ok() {
        ctx.pending_login.set(None);
    }
    ctx.signing_in.set(false);
    result
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub async fn logout(ctx: AuthContext) {
    ctx.pending_login.set(None);
    ctx.flow().logout().await;
}

/// 页面中直接使用的认证流程（注册、找回密码）
pub fn auth_flow(ctx: &AuthContext) -> Rc<Flow> {
    ctx.flow()
}
