use atelier::availability::{self, AvailabilityQuery};
use atelier::cart::{CartLine, VariantChoice};
use atelier::catalog::RequestGeneration;
use atelier::pricing::format_inr;
use atelier::shared::{AvailabilityWindow, DateRange, RentalDate, Selection, VariantAxis};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::cart::use_cart;
use crate::components::icons::{AlertCircle, ShoppingBag};
use crate::notify::use_notifier;

const DEFAULT_DESCRIPTION: &str = "Crafted with precision, this exclusive piece embodies elegance and tradition. Perfect for special occasions.";

/// 商品详情：选择变体与租期后加入购物车
///
/// 档期冲突只做提示，不阻止加入购物车。
#[component]
pub fn SelectionDetailsPage(id: String) -> impl IntoView {
    let auth = use_auth();
    let cart = use_cart();
    let notifier = use_notifier();
    let media = auth.media();

    let selection = RwSignal::new(Option::<Selection>::None);
    let loading = RwSignal::new(true);
    let active_image = RwSignal::new(String::new());
    let choice = RwSignal::new(VariantChoice::default());
    let deliver_date = RwSignal::new(Option::<RentalDate>::None);
    let receive_date = RwSignal::new(Option::<RentalDate>::None);
    let booked = RwSignal::new(Vec::<AvailabilityWindow>::new());
    let error = RwSignal::new(Option::<String>::None);

    {
        let media = media.clone();
        spawn_local(async move {
            match auth.api().selection(&id).await {
                Ok(item) => {
                    active_image.set(media.primary_photo(&item));
                    selection.set(Some(item));
                }
                Err(e) => tracing::error!(error = %e, %id, "failed to load selection"),
            }
            loading.set(false);
        });
    }

    // 只有商品或尺码变化才重新获取已预订时间段，换颜色不触发
    let selection_id = Memo::new(move |_| selection.with(|s| s.as_ref().map(|s| s.id.clone())));
    let sizes = Memo::new(move |_| choice.with(|c| (c.top_size.clone(), c.bottom_size.clone())));
    let generation = RequestGeneration::new();
    Effect::new(move |_| {
        let Some(selection_id) = selection_id.get() else {
            return;
        };
        let (top, bottom) = sizes.get();
        let query = AvailabilityQuery::new(&selection_id).with_sizes(top.as_deref(), bottom.as_deref());

        let ticket = generation.begin();
        let generation = generation.clone();
        spawn_local(async move {
            match query.fetch(&auth.api()).await {
                Ok(windows) if generation.is_current(ticket) => booked.set(windows),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "availability lookup failed"),
            }
        });
    });

    let proposed = move || {
        let start = deliver_date.get()?;
        let end = receive_date.get()?;
        Some(DateRange::new(start, end))
    };

    let conflict = Memo::new(move |_| {
        let range = proposed()?;
        booked.with(|windows| availability::check(windows, range).message())
    });

    // 冲突出现时额外弹一次提示；内联警告保持显示
    Effect::new(move |was_conflicting: Option<bool>| {
        let message = conflict.get();
        if let Some(fresh) = availability::fresh_conflict(was_conflicting.unwrap_or(false), message.as_deref()) {
            notifier.error(fresh);
        }
        message.is_some()
    });

    let on_add = move |_| {
        error.set(None);
        let Some(item) = selection.get_untracked() else {
            return;
        };
        let dates = proposed();
        let result = choice.with_untracked(|c| CartLine::from_selection(&item, c, dates));
        match result {
            Ok(line) => cart.add(line),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let parse_date = |ev| RentalDate::parse(&event_target_value(&ev));

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-[80vh]">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            }
        >
            {
                let media = media.clone();
                move || match selection.get() {
                    None => view! { <div class="text-center py-20">"Selection not found"</div> }.into_any(),
                    Some(item) => {
                        let photos = media.gallery(&item);
                        let axes: Vec<VariantAxis> =
                            VariantAxis::ALL.into_iter().filter(|a| item.offers(*a)).collect();
                        view! {
                            <div class="max-w-7xl mx-auto px-4 md:px-8 py-10 grid md:grid-cols-2 gap-10">
                                // 左侧：图片
                                <div>
                                    <img src=move || active_image.get() alt=item.name.clone() class="w-full aspect-[3/4] object-cover rounded-box" />
                                    <Show when={
                                        let count = photos.len();
                                        move || count > 1
                                    }>
                                        <div class="flex gap-2 mt-3 overflow-x-auto">
                                            {photos
                                                .iter()
                                                .cloned()
                                                .map(|photo| {
                                                    let target = photo.clone();
                                                    let current = photo.clone();
                                                    view! {
                                                        <button
                                                            class=move || if active_image.get() == current {
                                                                "border-2 border-primary rounded"
                                                            } else {
                                                                "border-2 border-transparent rounded"
                                                            }
                                                            on:click=move |_| active_image.set(target.clone())
                                                        >
                                                            <img src=photo alt="thumbnail" class="w-16 h-20 object-cover rounded" />
                                                        </button>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </Show>
                                </div>

                                // 右侧：信息与预订
                                <div class="space-y-6">
                                    <div>
                                        <span class="text-xs uppercase tracking-wide opacity-60">
                                            {item.category.clone().unwrap_or_else(|| "Collection".to_string())}
                                        </span>
                                        <h1 class="text-3xl font-serif mt-1">{item.name.clone()}</h1>
                                        <div class="flex items-center gap-3 mt-2">
                                            <span class="text-2xl font-semibold">{format_inr(item.price as f64)}</span>
                                            {item.sku.clone().map(|sku| view! {
                                                <span class="badge badge-ghost">"SKU: " {sku}</span>
                                            })}
                                        </div>
                                    </div>
                                    <p class="opacity-80">
                                        {item.description.clone().unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())}
                                    </p>
                                    <div class="divider"></div>

                                    {axes
                                        .into_iter()
                                        .map(|axis| {
                                            let options = item.options(axis).to_vec();
                                            view! {
                                                <div>
                                                    <label class="label font-medium">{axis.label()}</label>
                                                    <div class="flex flex-wrap gap-2">
                                                        {options
                                                            .into_iter()
                                                            .map(|value| {
                                                                let chosen = value.clone();
                                                                let current = value.clone();
                                                                view! {
                                                                    <button
                                                                        class=move || if choice.with(|c| c.get(axis) == Some(current.as_str())) {
                                                                            "btn btn-sm btn-primary"
                                                                        } else {
                                                                            "btn btn-sm btn-outline"
                                                                        }
                                                                        on:click=move |_| choice.update(|c| c.set(axis, Some(chosen.clone())))
                                                                    >
                                                                        {value}
                                                                    </button>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}

                                    <div class="grid grid-cols-2 gap-4">
                                        <label class="form-control">
                                            <span class="label-text mb-1">"Delivery date"</span>
                                            <input
                                                type="date"
                                                class="input input-bordered"
                                                on:change=move |ev| deliver_date.set(parse_date(ev))
                                            />
                                        </label>
                                        <label class="form-control">
                                            <span class="label-text mb-1">"Return date"</span>
                                            <input
                                                type="date"
                                                class="input input-bordered"
                                                on:change=move |ev| receive_date.set(parse_date(ev))
                                            />
                                        </label>
                                    </div>

                                    <Show when=move || conflict.with(Option::is_some)>
                                        <div role="alert" class="alert alert-warning text-sm">
                                            <AlertCircle attr:class="h-5 w-5" />
                                            <span>{move || conflict.get().unwrap_or_default()}</span>
                                        </div>
                                    </Show>

                                    <Show when=move || error.get().is_some()>
                                        <div role="alert" class="alert alert-error text-sm py-2">
                                            <AlertCircle attr:class="h-5 w-5" />
                                            <span>{move || error.get().unwrap_or_default()}</span>
                                        </div>
                                    </Show>

                                    <button class="btn btn-primary w-full gap-2" on:click=on_add>
                                        <ShoppingBag attr:class="h-5 w-5" />
                                        "Add to Cart"
                                    </button>
                                    <p class="text-xs text-center opacity-60">
                                        "Free shipping on all orders. Secure checkout."
                                    </p>
                                </div>
                            </div>
                        }
                        .into_any()
                    }
                }
            }
        </Show>
    }
}
