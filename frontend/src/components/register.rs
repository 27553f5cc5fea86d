//! 注册页面
//!
//! 注册会连同第一家业务一起创建。三个平台链接按
//! Google Maps > TripAdvisor > Yelp 的优先级取第一个非空的
//! 作为业务 url。

use super::icons::Utensils;
use crate::auth::{BrowserSessionManager, use_auth};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tabletalk_shared::protocol::{BusinessRegistration, RegisterRequest};

/// 把表单信号汇成一个结构，便于整体读取与重置
#[derive(Clone, Copy)]
struct RegisterForm {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    email: RwSignal<String>,
    password: RwSignal<String>,
    business_name: RwSignal<String>,
    business_address: RwSignal<String>,
    gmaps_link: RwSignal<String>,
    tripadvisor_link: RwSignal<String>,
    yelp_link: RwSignal<String>,
}

impl RegisterForm {
    fn new() -> Self {
        Self {
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            business_name: RwSignal::new(String::new()),
            business_address: RwSignal::new(String::new()),
            gmaps_link: RwSignal::new(String::new()),
            tripadvisor_link: RwSignal::new(String::new()),
            yelp_link: RwSignal::new(String::new()),
        }
    }

    /// 平台链接按优先级取第一个非空的
    fn business_url(&self) -> Option<String> {
        [self.gmaps_link, self.tripadvisor_link, self.yelp_link]
            .iter()
            .map(|link| link.get_untracked().trim().to_string())
            .find(|link| !link.is_empty())
    }

    fn to_request(&self) -> Option<RegisterRequest> {
        let url = self.business_url()?;
        let address = self.business_address.get_untracked().trim().to_string();
        Some(RegisterRequest {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            business: BusinessRegistration {
                name: self.business_name.get_untracked(),
                url,
                location: (!address.is_empty()).then_some(address),
                business_type: Some("restaurant".to_string()),
            },
        })
    }

    fn has_required_user_fields(&self) -> bool {
        ![
            self.first_name,
            self.last_name,
            self.email,
            self.password,
            self.business_name,
        ]
        .iter()
        .any(|field| field.get_untracked().trim().is_empty())
    }
}

#[component]
fn TextField(
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                type=input_type
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered w-full"
            />
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let form = RegisterForm::new();

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if !form.has_required_user_fields() {
            set_error_msg.set(Some("Please fill in all required fields".to_string()));
            return;
        }
        let Some(request) = form.to_request() else {
            set_error_msg.set(Some(
                "Add at least one review page link for your restaurant".to_string(),
            ));
            return;
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let manager = BrowserSessionManager::browser();
            match manager.register(&request).await {
                Ok(profile) => {
                    auth.set_authenticated(profile);
                }
                Err(e) => {
                    set_error_msg.set(Some(e.to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let go_login = move |_| router.navigate("/login");

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-2">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Utensils attr:class="h-8 w-8" />
                        </div>
                        <p class="text-sm text-base-content/70">"Start your journey"</p>
                        <h1 class="text-3xl font-bold">"Sign up to Tabletalk"</h1>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="grid grid-cols-2 gap-3">
                            <TextField label="First name *" value=form.first_name />
                            <TextField label="Last name *" value=form.last_name />
                        </div>
                        <TextField
                            label="Email *"
                            input_type="email"
                            placeholder="you@restaurant.com"
                            value=form.email
                        />
                        <TextField label="Password *" input_type="password" value=form.password />

                        <div class="divider text-sm text-base-content/60">"Your restaurant"</div>

                        <TextField label="Restaurant name *" value=form.business_name />
                        <TextField label="Address" value=form.business_address />
                        <TextField
                            label="Google Maps link"
                            placeholder="https://maps.app.goo.gl/..."
                            value=form.gmaps_link
                        />
                        <TextField
                            label="TripAdvisor link"
                            value=form.tripadvisor_link
                        />
                        <TextField label="Yelp link" value=form.yelp_link />

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "Already have an account? "
                            <a class="link link-primary" on:click=go_login>"Log in"</a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
