use atelier::navigation;
use atelier::pricing::{OrderTotals, format_inr};
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::cart::use_cart;
use crate::components::icons::{Close, ShoppingBag, Trash};
use crate::web::router::use_router;

/// 右侧滑出的购物车
#[component]
pub fn CartDrawer() -> impl IntoView {
    let cart = use_cart();
    let auth = use_auth();
    let router = use_router();
    let media = auth.media();

    let totals = move || OrderTotals::from_subtotal(cart.subtotal());

    let go_checkout = move |_| {
        cart.set_open(false);
        router.navigate(navigation::CHECKOUT_PATH);
    };
    let go_browse = move |_| {
        cart.set_open(false);
        router.navigate(navigation::CATALOG_PATH);
    };

    view! {
        <Show when=move || cart.is_open()>
            <div class="fixed inset-0 z-50 flex justify-end">
                <div class="absolute inset-0 bg-black/40" on:click=move |_| cart.set_open(false)></div>
                <aside class="relative w-full max-w-md h-full bg-base-100 shadow-2xl flex flex-col">
                    <div class="flex items-center justify-between p-4 border-b border-base-300">
                        <h2 class="text-lg font-semibold flex items-center gap-2">
                            <ShoppingBag attr:class="h-5 w-5" />
                            "Your Cart (" {move || cart.len()} ")"
                        </h2>
                        <button class="btn btn-ghost btn-sm btn-circle" on:click=move |_| cart.set_open(false)>
                            <Close attr:class="h-5 w-5" />
                        </button>
                    </div>

                    <Show
                        when=move || { cart.len() > 0 }
                        fallback=move || view! {
                            <div class="flex-1 flex flex-col items-center justify-center gap-4 p-8 text-center">
                                <p class="text-base-content/60">"Your cart is empty"</p>
                                <button class="btn btn-outline btn-sm" on:click=go_browse>"Browse Selections"</button>
                            </div>
                        }
                    >
                        <ul class="flex-1 overflow-y-auto divide-y divide-base-200">
                            <For
                                each=move || cart.lines()
                                key=|line| line.unique_id.clone()
                                children={
                                    let media = media.clone();
                                    move |line| {
                                        let unique_id = line.unique_id.clone();
                                        let photo = media.primary_photo(&line.item);
                                        let summary = line.variant_summary();
                                        let dates = line.dates().map(|d| d.to_string());
                                        view! {
                                            <li class="flex gap-3 p-4">
                                                <img src=photo alt=line.item.name.clone() class="w-20 h-24 object-cover rounded" />
                                                <div class="flex-1 min-w-0">
                                                    <p class="font-medium truncate">{line.item.name.clone()}</p>
                                                    <p class="text-xs text-base-content/60">{summary}</p>
                                                    {dates.map(|d| view! { <p class="text-xs text-base-content/60">{d}</p> })}
                                                    <p class="text-sm font-semibold mt-1">{format_inr(line.price() as f64)}</p>
                                                </div>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error"
                                                    on:click=move |_| cart.remove(&unique_id)
                                                >
                                                    <Trash attr:class="h-4 w-4" />
                                                </button>
                                            </li>
                                        }
                                    }
                                }
                            />
                        </ul>

                        <div class="border-t border-base-300 p-4 space-y-2 text-sm">
                            <div class="flex justify-between">
                                <span>"Rent"</span>
                                <span>{move || format_inr(totals().rent)}</span>
                            </div>
                            <div class="flex justify-between">
                                <span>"Refundable deposit (50%)"</span>
                                <span>{move || format_inr(totals().deposit)}</span>
                            </div>
                            <div class="flex justify-between font-semibold text-base">
                                <span>"Total"</span>
                                <span>{move || format_inr(totals().total)}</span>
                            </div>
                            <button class="btn btn-primary w-full mt-2" on:click=go_checkout>
                                "Checkout"
                            </button>
                        </div>
                    </Show>
                </aside>
            </div>
        </Show>
    }
}
