use atelier::session::AuthOutcome;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::AlertCircle;
use crate::notify::use_notifier;
use crate::web::router::Link;

/// 注册分两步：填写资料后服务端发送 OTP，再用 OTP 完成验证
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Details,
    Verify,
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (step, set_step) = signal(Step::Details);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (otp, set_otp) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if name.get().trim().is_empty() || email.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let outcome = auth
                .register(
                    name.get_untracked().trim(),
                    email.get_untracked().trim(),
                    &password.get_untracked(),
                )
                .await;
            match outcome {
                AuthOutcome::Success(()) => {
                    notifier.success("OTP sent to your email!");
                    set_step.set(Step::Verify);
                }
                AuthOutcome::Failure(message) => set_error_msg.set(Some(message)),
            }
            set_is_submitting.set(false);
        });
    };

    // 验证成功即建立会话，跳转交给路由服务
    let on_verify = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if otp.get().trim().is_empty() {
            set_error_msg.set(Some("Please enter the OTP".to_string()));
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let outcome = auth
                .verify_otp(email.get_untracked().trim(), otp.get_untracked().trim())
                .await;
            match outcome {
                AuthOutcome::Success(_) => notifier.success("Account verified! Welcome!"),
                AuthOutcome::Failure(message) => set_error_msg.set(Some(message)),
            }
            set_is_submitting.set(false);
        });
    };

    let submit_label = move |idle: &'static str, busy: &'static str| {
        move || {
            if is_submitting.get() {
                view! { <span class="loading loading-spinner"></span> {busy} }.into_any()
            } else {
                idle.into_any()
            }
        }
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-serif">
                        {move || match step.get() {
                            Step::Details => "Create Account",
                            Step::Verify => "Verify Email",
                        }}
                    </h1>
                    <p class="text-base-content/70">
                        {move || match step.get() {
                            Step::Details => "Join us for exclusive rentals".to_string(),
                            Step::Verify => format!("Enter the code sent to {}", email.get()),
                        }}
                    </p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2 m-6 mb-0 w-auto">
                            <AlertCircle attr:class="h-5 w-5" />
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <Show
                        when=move || step.get() == Step::Details
                        fallback=move || view! {
                            <form class="card-body" on:submit=on_verify>
                                <div class="form-control">
                                    <label class="label" for="otp">
                                        <span class="label-text">"One-time password"</span>
                                    </label>
                                    <input
                                        id="otp"
                                        type="text"
                                        inputmode="numeric"
                                        placeholder="123456"
                                        on:input=move |ev| set_otp.set(event_target_value(&ev))
                                        prop:value=otp
                                        class="input input-bordered tracking-widest text-center"
                                        required
                                    />
                                </div>
                                <div class="form-control mt-6">
                                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                        {submit_label("Verify", "Verifying...")}
                                    </button>
                                </div>
                            </form>
                        }
                    >
                        <form class="card-body" on:submit=on_register>
                            <div class="form-control">
                                <label class="label" for="name">
                                    <span class="label-text">"Full Name"</span>
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                    prop:value=name
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="email">
                                    <span class="label-text">"Email"</span>
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    placeholder="you@example.com"
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    prop:value=email
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="password">
                                    <span class="label-text">"Password"</span>
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    placeholder="••••••••"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {submit_label("Register", "Sending OTP...")}
                                </button>
                            </div>
                            <p class="text-sm text-center mt-2">
                                "Already have an account? "
                                <Link to="/login" class="link link-primary">"Sign In"</Link>
                            </p>
                        </form>
                    </Show>
                </div>
            </div>
        </div>
    }
}
