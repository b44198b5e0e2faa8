use atelier::catalog::{self, ALL_CATEGORIES, CatalogQuery, RequestGeneration, SEARCH_DEBOUNCE_MS};
use atelier::pricing::format_inr;
use atelier::shared::Selection;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::Search;
use crate::web::Debouncer;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

/// 商品列表
///
/// 分类筛选写在 URL 上（`/selections?category=...`），切换分类即导航；
/// 搜索框防抖后才发请求，过期的响应直接丢弃。
#[component]
pub fn SelectionsPage(category: Option<String>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let media = auth.media();

    let current_category = category.unwrap_or_else(|| ALL_CATEGORIES.to_string());
    let (selections, set_selections) = signal(Vec::<Selection>::new());
    let (loading, set_loading) = signal(true);
    let (category_names, set_category_names) = signal(vec![ALL_CATEGORIES.to_string()]);
    let (search, set_search) = signal(String::new());

    let generation = RequestGeneration::new();
    let debouncer = Debouncer::new(SEARCH_DEBOUNCE_MS);

    // 分类列表只取一次
    spawn_local(async move {
        match auth.api().categories().await {
            Ok(list) => set_category_names.set(catalog::category_options(&list)),
            Err(e) => tracing::error!(error = %e, "failed to load categories"),
        }
    });

    let fetch = {
        let category = current_category.clone();
        move |term: String| {
            let query = CatalogQuery::default()
                .with_category(&category)
                .with_search(&term);
            let ticket = generation.begin();
            let generation = generation.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = auth.api().selections(&query).await;
                if !generation.is_current(ticket) {
                    tracing::debug!(ticket, "discarding stale catalog response");
                    return;
                }
                match result {
                    Ok(list) => set_selections.set(list),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to fetch selections");
                        set_selections.set(Vec::new());
                    }
                }
                set_loading.set(false);
            });
        }
    };
    fetch(String::new());

    let on_search = {
        let fetch = fetch.clone();
        move |ev| {
            let term = event_target_value(&ev);
            set_search.set(term.clone());
            let fetch = fetch.clone();
            debouncer.call(move || fetch(term));
        }
    };

    let on_category = move |ev| {
        let value = event_target_value(&ev);
        let category = (value != ALL_CATEGORIES).then_some(value);
        router.navigate(&AppRoute::Selections { category }.to_path());
    };

    let selected = current_category.clone();

    view! {
        <section class="bg-base-200 py-12">
            <div class="max-w-7xl mx-auto px-4 md:px-8 text-center">
                <h1 class="text-4xl font-serif mb-2">"Exclusive Collection"</h1>
                <p class="opacity-70 mb-6">
                    "Discover our premium range of "
                    {move || {
                        let n = selections.with(Vec::len);
                        if n > 0 { format!("{n} ") } else { String::new() }
                    }}
                    "handcrafted ethnic wear."
                </p>
                <div class="flex flex-col md:flex-row gap-3 justify-center">
                    <select class="select select-bordered w-full md:w-64" on:change=on_category>
                        <For
                            each=move || category_names.get()
                            key=|name| name.clone()
                            children=move |name| {
                                let is_selected = name == selected;
                                view! { <option value=name.clone() selected=is_selected>{name.clone()}</option> }
                            }
                        />
                    </select>
                    <label class="input input-bordered flex items-center gap-2 w-full md:w-80">
                        <Search attr:class="h-4 w-4 opacity-60" />
                        <input
                            type="search"
                            class="grow"
                            placeholder="Search selections"
                            prop:value=search
                            on:input=on_search
                        />
                    </label>
                </div>
            </div>
        </section>

        <section class="max-w-7xl mx-auto px-4 md:px-8 py-10">
            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-6">
                        {(0..8).map(|_| view! { <div class="skeleton h-80 w-full"></div> }).collect_view()}
                    </div>
                }
            >
                <Show
                    when=move || selections.with(|s| !s.is_empty())
                    fallback=|| view! {
                        <p class="text-center py-16 text-base-content/60">"No selections found."</p>
                    }
                >
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-6">
                        <For
                            each=move || selections.get()
                            key=|s| s.id.clone()
                            children={
                                let media = media.clone();
                                move |item| {
                                    let photo = media.primary_photo(&item);
                                    let href = AppRoute::SelectionDetail(item.id.clone()).to_path();
                                    view! {
                                        <Link to=href class="card bg-base-100 shadow hover:shadow-xl transition-shadow">
                                            <figure class="aspect-[4/5]">
                                                <img src=photo alt=item.name.clone() loading="lazy" class="w-full h-full object-cover" />
                                            </figure>
                                            <div class="card-body p-4 gap-1">
                                                <span class="text-xs uppercase tracking-wide opacity-60">
                                                    {item.category.clone().unwrap_or_default()}
                                                </span>
                                                <h3 class="font-medium">{item.name.clone()}</h3>
                                                <span class="font-semibold">{format_inr(item.price as f64)}</span>
                                            </div>
                                        </Link>
                                    }
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}
