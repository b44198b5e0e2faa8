use atelier::navigation;
use atelier::orders::OrderDesk;
use atelier::pricing::{OrderTotals, format_inr};
use atelier::shared::{Order, RentalDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::admin::order_details::OrderDetailsModal;
use crate::components::icons::{ChevronRight, Eye, ShoppingBag};
use crate::web::router::Link;

fn status_badge(order: &Order) -> &'static str {
    use atelier::shared::FulfillmentStatus::*;
    match order.status {
        Confirmed | Delivered | Received => "badge badge-success",
        Cancelled => "badge badge-error",
        Pending | Unknown => "badge badge-warning",
    }
}

/// 下单日期（dd/mm/yyyy），服务端没给时留空
fn placed_on(order: &Order) -> String {
    order
        .created_at
        .as_deref()
        .and_then(RentalDate::parse)
        .map(|d| d.display_long())
        .unwrap_or_default()
}

/// 顾客的订单历史
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (loading, set_loading) = signal(true);
    let viewing = RwSignal::new(Option::<String>::None);

    spawn_local(async move {
        let api = auth.api();
        match OrderDesk::new(&api).my_orders().await {
            Ok(list) => set_orders.set(list),
            Err(e) => tracing::error!(error = %e, "failed to fetch orders"),
        }
        set_loading.set(false);
    });

    let welcome = move || {
        let name = auth.user().map(|u| u.name).unwrap_or_default();
        format!("Welcome, {name}. Manage your curated selections and orders.")
    };

    view! {
        <section class="bg-base-200 py-12">
            <div class="max-w-6xl mx-auto px-4 md:px-8">
                <h1 class="text-4xl font-serif">"My Account"</h1>
                <p class="opacity-70 mt-2">{welcome}</p>
            </div>
        </section>

        <section class="max-w-6xl mx-auto px-4 md:px-8 py-10">
            <div class="flex items-center justify-between mb-6">
                <h2 class="text-2xl font-serif">"Order History"</h2>
                <Link to=navigation::CATALOG_PATH class="link link-hover text-sm inline-flex items-center gap-1">
                    "Browse New Selections"
                    <ChevronRight attr:class="h-4 w-4" />
                </Link>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <Show
                    when=move || orders.with(|o| !o.is_empty())
                    fallback=|| view! {
                        <div class="text-center py-16 space-y-4">
                            <ShoppingBag attr:class="h-10 w-10 mx-auto opacity-40" />
                            <h3 class="text-xl font-medium">"No orders placed yet"</h3>
                            <p class="opacity-70">"Your collection awaits. Start your journey with our exclusive pieces."</p>
                            <Link to=navigation::CATALOG_PATH class="btn btn-primary">"View Collection"</Link>
                        </div>
                    }
                >
                    <div class="space-y-4">
                        <For
                            each=move || orders.get()
                            key=|o| o.id.clone()
                            children=move |order| {
                                let totals = OrderTotals::from_order(&order);
                                let plural = if order.items_count == 1 { "" } else { "s" };
                                let id = order.id.clone();
                                view! {
                                    <div class="card card-side bg-base-100 shadow">
                                        <div class="card-body">
                                            <div class="flex items-center gap-3">
                                                <h3 class="card-title text-lg">{format!("{} Item{plural}", order.items_count)}</h3>
                                                <span class=status_badge(&order)>{order.status.label()}</span>
                                            </div>
                                            <div class="grid grid-cols-3 gap-4 text-sm">
                                                <div>
                                                    <div class="opacity-60">"Order ID"</div>
                                                    <div class="font-mono">"#" {order.short_code()}</div>
                                                </div>
                                                <div>
                                                    <div class="opacity-60">"Date"</div>
                                                    <div>{placed_on(&order)}</div>
                                                </div>
                                                <div>
                                                    <div class="opacity-60">"Total Amount"</div>
                                                    <div class="font-semibold text-primary">{format_inr(totals.total)}</div>
                                                </div>
                                            </div>
                                        </div>
                                        <div class="flex items-center pr-6">
                                            <button class="btn btn-outline btn-sm gap-2" on:click=move |_| viewing.set(Some(id.clone()))>
                                                <Eye attr:class="h-4 w-4" />
                                                "View Details"
                                            </button>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <OrderDetailsModal order_id=viewing />
        </section>
    }
}
