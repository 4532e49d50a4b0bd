mod fetch;
mod view;

use chart_index::{DataSource, Navigator};
use log::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use fetch::{fetch_maps, fetch_products};
use view::*;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

// ─── App Component ──────────────────────────────────────────────────

#[function_component(App)]
fn app() -> Html {
    let source = use_memo((), |_| {
        let query = gloo::utils::window()
            .location()
            .search()
            .unwrap_or_default();
        DataSource::from_query(&query)
    });
    let navigator = use_mut_ref(Navigator::new);
    let rerender = use_force_update();

    // Fetch the product index on mount
    {
        let source = source.clone();
        let navigator = navigator.clone();
        let rerender = rerender.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = fetch_products(&source).await;
                if let Err(e) = &result {
                    warn!("product index unavailable: {e}");
                }
                navigator.borrow_mut().products_loaded(result);
                rerender.force_update();
            });
            || ()
        });
    }

    let on_product_click = {
        let source = source.clone();
        let navigator = navigator.clone();
        let rerender = rerender.clone();

        Callback::from(move |index: usize| {
            let Some(request) = navigator.borrow_mut().select_product(index) else {
                return;
            };
            rerender.force_update();

            let source = source.clone();
            let navigator = navigator.clone();
            let rerender = rerender.clone();
            spawn_local(async move {
                let result = fetch_maps(&source, &request.indexfile).await;
                if let Err(e) = &result {
                    warn!("map index {} unavailable: {e}", request.indexfile);
                }
                if navigator.borrow_mut().maps_loaded(request.ticket, result) {
                    rerender.force_update();
                }
            });
        })
    };

    let on_map_click = {
        let source = source.clone();
        let navigator = navigator.clone();
        let rerender = rerender.clone();

        Callback::from(move |index: usize| {
            let shown = navigator
                .borrow_mut()
                .select_map(index, &source)
                .map(str::to_string);
            if let Some(src) = shown {
                debug!("showing {src}");
                rerender.force_update();
            }
        })
    };

    let on_dismiss_error = {
        let navigator = navigator.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: ()| {
            navigator.borrow_mut().dismiss_error();
            rerender.force_update();
        })
    };

    let nav = navigator.borrow();

    let page = html! {
        <div id="topmostdiv" class="browser">
            if let Some(err) = nav.error() {
                <ErrorBanner message={err.to_string()} on_dismiss={on_dismiss_error} />
            }
            if let Some(products) = nav.products() {
                <ProductList
                    products={products.to_vec()}
                    selected={nav.selected_index()}
                    on_select={on_product_click}
                />
            } else if nav.products_unavailable() {
                if nav.error().is_none() {
                    <div class="loading">{format!("{} is unavailable", source.product_index_url())}</div>
                }
            } else {
                <div class="loading">{format!("Loading {}...", source.product_index_url())}</div>
            }
            if nav.pending().is_some() {
                <div class="loading">{"Loading maps..."}</div>
            }
            if let Some(view) = nav.map_view() {
                // Keyed on the surface so every product selection mounts a new image.
                <div class="maps" key={view.surface.id().to_string()}>
                    <MapList
                        title={view.title.clone()}
                        entries={view.entries.clone()}
                        on_select={on_map_click}
                    />
                    <ImageSurface src={view.surface.src().map(str::to_string)} />
                </div>
            }
        </div>
    };
    drop(nav);
    page
}
