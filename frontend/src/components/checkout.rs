use atelier::checkout::{CheckoutDraft, CheckoutError, CheckoutFlow};
use atelier::navigation;
use atelier::pricing::{OrderTotals, format_inr};
use atelier::shared::RentalDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::cart::use_cart;
use crate::components::icons::CheckCircle;
use crate::notify::use_notifier;
use crate::web::router::{Link, use_router};

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let auth = use_auth();
    let cart = use_cart();
    let router = use_router();
    let notifier = use_notifier();
    let media = auth.media();

    let draft = RwSignal::new(cart.store.with_untracked(CheckoutDraft::prefilled));
    let (submitting, set_submitting) = signal(false);
    let (success, set_success) = signal(false);

    // 空购物车不停留在结账页
    Effect::new(move |_| {
        if cart.len() == 0 && !success.get() {
            router.navigate(navigation::CATALOG_PATH);
        }
    });

    let totals = move || OrderTotals::from_subtotal(cart.subtotal());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);

        spawn_local(async move {
            let api = auth.api();
            let session = auth.session();
            let form = draft.get_untracked();
            let mut store = cart.store.get_untracked();

            let result = CheckoutFlow::new(&api)
                .submit(session.as_ref(), &mut store, &form)
                .await;

            match result {
                Ok(()) => {
                    set_success.set(true);
                    cart.store.set(store);
                    notifier.success("Order placed successfully!");
                }
                Err(CheckoutError::NotAuthenticated) => {
                    notifier.error(CheckoutError::NotAuthenticated.to_string());
                    router.redirect_to_login(navigation::CHECKOUT_PATH);
                }
                Err(e) => notifier.error(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    let date_value = |date: Option<RentalDate>| date.map(|d| d.to_input_value()).unwrap_or_default();

    view! {
        <Show
            when=move || !success.get()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-[60vh] px-4">
                    <div class="card bg-base-100 shadow-xl max-w-md w-full">
                        <div class="card-body items-center text-center">
                            <CheckCircle attr:class="h-16 w-16 text-success" />
                            <h1 class="text-2xl font-serif">"Booking Confirmed!"</h1>
                            <p class="opacity-70">"Thank you for choosing Selection. We will review your request shortly."</p>
                            <div class="card-actions mt-4">
                                <Link to="/dashboard" class="btn btn-primary">"View My Orders"</Link>
                                <Link to=navigation::HOME_PATH class="btn btn-outline">"Back Home"</Link>
                            </div>
                        </div>
                    </div>
                </div>
            }
        >
            <div class="max-w-6xl mx-auto px-4 md:px-8 py-10">
                <Link to=navigation::CATALOG_PATH class="link link-hover text-sm">"← Continue Shopping"</Link>
                <h1 class="text-3xl font-serif mt-2 mb-8">"Complete Your Booking"</h1>

                <div class="grid md:grid-cols-3 gap-8">
                    // 左侧：表单
                    <div class="md:col-span-2 space-y-6">
                        <div class="card bg-base-100 shadow">
                            <form id="checkout-form" class="card-body" on:submit=on_submit>
                                <h3 class="card-title">"Event Details"</h3>
                                <p class="text-sm opacity-70">"Please specify when you need the items."</p>
                                <div class="grid grid-cols-2 gap-4">
                                    <label class="form-control">
                                        <span class="label-text mb-1">"Delivery Date"</span>
                                        <input
                                            type="date"
                                            class="input input-bordered"
                                            prop:value=move || draft.with(|d| date_value(d.delivery_date))
                                            on:change=move |ev| {
                                                let value = RentalDate::parse(&event_target_value(&ev));
                                                draft.update(|d| d.delivery_date = value);
                                            }
                                        />
                                    </label>
                                    <label class="form-control">
                                        <span class="label-text mb-1">"Return Date"</span>
                                        <input
                                            type="date"
                                            class="input input-bordered"
                                            prop:value=move || draft.with(|d| date_value(d.return_date))
                                            on:change=move |ev| {
                                                let value = RentalDate::parse(&event_target_value(&ev));
                                                draft.update(|d| d.return_date = value);
                                            }
                                        />
                                    </label>
                                </div>
                                <label class="form-control">
                                    <span class="label-text mb-1">"Additional Notes (Optional)"</span>
                                    <textarea
                                        class="textarea textarea-bordered"
                                        rows="4"
                                        placeholder="Any special requests?"
                                        prop:value=move || draft.with(|d| d.notes.clone())
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            draft.update(|d| d.notes = value);
                                        }
                                    ></textarea>
                                </label>
                            </form>
                        </div>

                        <Show when=move || !auth.is_authenticated()>
                            <div role="alert" class="alert">
                                <span>"You must be logged in to place an order."</span>
                                <button
                                    class="btn btn-outline btn-sm"
                                    on:click=move |_| router.redirect_to_login(navigation::CHECKOUT_PATH)
                                >
                                    "Login Now"
                                </button>
                            </div>
                        </Show>
                    </div>

                    // 右侧：订单摘要
                    <div class="card bg-base-100 shadow h-fit">
                        <div class="card-body">
                            <h3 class="card-title">"Order Summary"</h3>
                            <ul class="divide-y divide-base-200">
                                <For
                                    each=move || cart.lines()
                                    key=|line| line.unique_id.clone()
                                    children={
                                        let media = media.clone();
                                        move |line| {
                                            let photo = media.primary_photo(&line.item);
                                            let dates = line.dates().map(|d| d.to_string());
                                            view! {
                                                <li class="flex gap-3 py-3">
                                                    <img src=photo alt=line.item.name.clone() class="w-14 h-16 object-cover rounded" />
                                                    <div class="flex-1 text-sm">
                                                        <p class="font-medium">{line.item.name.clone()}</p>
                                                        <p class="opacity-60">{line.variant_summary()}</p>
                                                        {dates.map(|d| view! { <p class="opacity-60">{d}</p> })}
                                                    </div>
                                                    <span class="text-sm font-semibold">{format_inr(line.price() as f64)}</span>
                                                </li>
                                            }
                                        }
                                    }
                                />
                            </ul>
                            <div class="space-y-1 text-sm border-t border-base-300 pt-3">
                                <div class="flex justify-between">
                                    <span>"Rent"</span>
                                    <span>{move || format_inr(totals().rent)}</span>
                                </div>
                                <div class="flex justify-between">
                                    <span>"Deposit (50%)"</span>
                                    <span>{move || format_inr(totals().deposit)}</span>
                                </div>
                                <div class="flex justify-between font-semibold text-base">
                                    <span>"Total Payable"</span>
                                    <span>{move || format_inr(totals().total)}</span>
                                </div>
                            </div>
                            <button
                                type="submit"
                                form="checkout-form"
                                class="btn btn-primary w-full mt-4"
                                disabled=move || submitting.get()
                            >
                                {move || if submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Processing..." }.into_any()
                                } else {
                                    "Confirm Booking".into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
