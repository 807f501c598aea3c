//! Browser host: `requestAnimationFrame` loop, DOM listeners, and image
//! fetching around a [`Gallery`].
//!
//! ```js
//! import init, { mount_gallery } from "./vitrine.js";
//! await init();
//! const handle = mount_gallery(canvas, galleryEl, ".image-container", urls);
//! // later
//! handle.unmount();
//! ```
//!
//! All state lives in one `Rc<Runtime>`. Every JS callback holds a `Weak`
//! to it, so a callback that fires after unmount finds nothing to do.

mod dom;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use js_sys::{Array, Uint8Array};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    AddEventListenerOptions, Element, Event, EventTarget, HtmlCanvasElement,
    MouseEvent, Response, TouchEvent, WheelEvent, Window,
};

pub use dom::{DomElement, DomHost};

use crate::{
    backend::ImagePixels, error::VitrineError, gallery::ImageRequest,
    gpu::WgpuBackend, layout::LayoutHost, options::Options, FrameOutcome,
    Gallery, InputEvent,
};

type WebGallery = Gallery<WgpuBackend, DomHost>;

/// A window listener kept alive until unmount.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

struct Runtime {
    gallery: RefCell<WebGallery>,
    window: Window,
    mounted: Cell<bool>,
    frame: RefCell<Option<Closure<dyn FnMut()>>>,
    frame_handle: Cell<Option<i32>>,
    settle: RefCell<Option<Closure<dyn FnMut()>>>,
    settle_handle: Cell<Option<i32>>,
    listeners: RefCell<Vec<Listener>>,
}

impl Runtime {
    fn request_frame(&self) {
        if !self.mounted.get() || self.frame_handle.get().is_some() {
            return;
        }
        let frame = self.frame.borrow();
        let Some(callback) = frame.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => self.frame_handle.set(Some(handle)),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
    }

    fn on_frame(&self) {
        self.frame_handle.set(None);
        if !self.mounted.get() {
            return;
        }
        let outcome = match self.gallery.try_borrow_mut() {
            Ok(mut gallery) => gallery.tick(),
            // Busy in an event handler; try again next frame.
            Err(_) => FrameOutcome::Continue,
        };
        if outcome == FrameOutcome::Continue {
            self.request_frame();
        }
    }

    fn dispatch(&self, event: InputEvent) {
        if let Ok(mut gallery) = self.gallery.try_borrow_mut() {
            let _ = gallery.handle_event(event);
        }
    }

    fn unmount(&self) {
        if !self.mounted.replace(false) {
            return;
        }
        if let Some(handle) = self.frame_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        if let Some(handle) = self.settle_handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        for listener in self.listeners.borrow_mut().drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        let _ = self.frame.borrow_mut().take();
        let _ = self.settle.borrow_mut().take();
        if let Ok(mut gallery) = self.gallery.try_borrow_mut() {
            gallery.stop();
        }
        log::info!("gallery unmounted");
    }
}

/// Handle returned to JavaScript. Dropping it (or calling `unmount`)
/// cancels the frame loop and removes every listener.
#[wasm_bindgen]
pub struct GalleryHandle {
    runtime: Rc<Runtime>,
}

#[wasm_bindgen]
impl GalleryHandle {
    /// Whether media items exist and frames are running.
    #[must_use]
    pub fn loaded(&self) -> bool {
        self.runtime
            .gallery
            .try_borrow()
            .is_ok_and(|gallery| gallery.status().loaded)
    }

    /// Terminal error message, if bootstrap or a frame failed.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.runtime
            .gallery
            .try_borrow()
            .ok()
            .and_then(|gallery| gallery.status().error.clone())
    }

    /// Stop the gallery and release its GPU resources. Idempotent.
    pub fn unmount(&self) {
        self.runtime.unmount();
    }
}

impl Drop for GalleryHandle {
    fn drop(&mut self) {
        self.runtime.unmount();
    }
}

/// Mount a gallery drawing to `canvas` over the slots matching `selector`
/// inside `gallery`. `images` lists image URLs cycled over the slots; an
/// empty array keeps the built-in defaults.
///
/// # Errors
///
/// Rejects with a message if there is no browser window or the resulting
/// options are invalid. GPU failures surface later through
/// [`GalleryHandle::error`].
#[wasm_bindgen]
pub fn mount_gallery(
    canvas: HtmlCanvasElement,
    gallery: Element,
    selector: &str,
    images: &Array,
) -> Result<GalleryHandle, JsValue> {
    init_logging();
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let mut options = Options::default();
    selector.clone_into(&mut options.gallery.selector);
    let urls: Vec<String> = images.iter().filter_map(|v| v.as_string()).collect();
    if !urls.is_empty() {
        options.images.urls = urls;
    }
    options.validate().map_err(to_js)?;

    // The canvas overlays the page; input goes to the window.
    let _ = canvas.style().set_property("pointer-events", "none");

    let host = DomHost::new(window.clone(), gallery);
    let mut gallery = Gallery::new(options, host);
    gallery.start().map_err(to_js)?;
    let size = gallery.host().window_size();

    let runtime = Rc::new(Runtime {
        gallery: RefCell::new(gallery),
        window,
        mounted: Cell::new(true),
        frame: RefCell::new(None),
        frame_handle: Cell::new(None),
        settle: RefCell::new(None),
        settle_handle: Cell::new(None),
        listeners: RefCell::new(Vec::new()),
    });

    let weak = Rc::downgrade(&runtime);
    *runtime.frame.borrow_mut() = Some(Closure::new(move || {
        if let Some(runtime) = weak.upgrade() {
            runtime.on_frame();
        }
    }));

    let weak = Rc::downgrade(&runtime);
    spawn_local(async move {
        let surface = (size.width.max(1.0) as u32, size.height.max(1.0) as u32);
        let backend = WgpuBackend::create(
            wgpu::SurfaceTarget::Canvas(canvas),
            surface,
        )
        .await;
        if let Some(runtime) = weak.upgrade() {
            attach(&runtime, backend);
        }
    });

    Ok(GalleryHandle { runtime })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(error: VitrineError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Bootstrap continuation: hand over the backend, then wait out the settle
/// delay before creating media.
fn attach(runtime: &Rc<Runtime>, backend: Result<WgpuBackend, VitrineError>) {
    if !runtime.mounted.get() {
        log::debug!("backend ready after unmount, discarding");
        return;
    }
    let delay = match runtime.gallery.borrow_mut().attach_backend(backend) {
        Ok(delay) => delay,
        Err(e) => {
            log::error!("gallery bootstrap failed: {e}");
            return;
        }
    };

    let weak = Rc::downgrade(runtime);
    let callback = Closure::<dyn FnMut()>::new(move || {
        if let Some(runtime) = weak.upgrade() {
            runtime.settle_handle.set(None);
            settle(&runtime);
        }
    });
    match runtime
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay.as_millis() as i32,
        ) {
        Ok(handle) => runtime.settle_handle.set(Some(handle)),
        Err(e) => log::error!("setTimeout failed: {e:?}"),
    }
    *runtime.settle.borrow_mut() = Some(callback);
}

fn settle(runtime: &Rc<Runtime>) {
    if !runtime.mounted.get() {
        return;
    }
    if let Err(e) = runtime.gallery.borrow_mut().finish_settling() {
        log::error!("gallery could not start: {e}");
        return;
    }
    add_listeners(runtime);
    spawn_image_loads(runtime);
    runtime.request_frame();
}

fn add_listeners(runtime: &Rc<Runtime>) {
    listen(runtime, "resize", true, |_| Some(InputEvent::Resized));
    listen(runtime, "wheel", false, |event| {
        let wheel = event.dyn_ref::<WheelEvent>()?;
        Some(InputEvent::Wheel {
            delta_y: wheel.delta_y() as f32,
        })
    });
    listen(runtime, "mousedown", true, |event| {
        let mouse = event.dyn_ref::<MouseEvent>()?;
        Some(InputEvent::PointerDown {
            y: mouse.client_y() as f32,
        })
    });
    listen(runtime, "mousemove", true, |event| {
        let mouse = event.dyn_ref::<MouseEvent>()?;
        Some(InputEvent::PointerMove {
            y: mouse.client_y() as f32,
        })
    });
    listen(runtime, "mouseup", true, |_| Some(InputEvent::PointerUp));
    listen(runtime, "touchstart", true, |event| {
        first_touch_y(event).map(|y| InputEvent::PointerDown { y })
    });
    listen(runtime, "touchmove", true, |event| {
        first_touch_y(event).map(|y| InputEvent::PointerMove { y })
    });
    listen(runtime, "touchend", true, |_| Some(InputEvent::PointerUp));
}

/// Register a window listener translating `kind` events into gallery
/// input. Non-passive listeners cancel the browser default (page scroll).
fn listen(
    runtime: &Rc<Runtime>,
    kind: &'static str,
    passive: bool,
    translate: fn(&Event) -> Option<InputEvent>,
) {
    let target: EventTarget = runtime.window.clone().into();
    let weak = Rc::downgrade(runtime);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if !passive {
            event.prevent_default();
        }
        let Some(runtime) = weak.upgrade() else {
            return;
        };
        if let Some(input) = translate(&event) {
            runtime.dispatch(input);
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    if let Err(e) = target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )
    {
        log::warn!("could not listen for {kind}: {e:?}");
        return;
    }
    runtime.listeners.borrow_mut().push(Listener {
        target,
        kind,
        callback,
    });
}

fn first_touch_y(event: &Event) -> Option<f32> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(touch.client_y() as f32)
}

/// Start a fetch for every queued image request.
fn spawn_image_loads(runtime: &Rc<Runtime>) {
    let requests = match runtime.gallery.try_borrow_mut() {
        Ok(mut gallery) => gallery.take_image_requests(),
        Err(_) => return,
    };
    for request in requests {
        let weak = Rc::downgrade(runtime);
        let window = runtime.window.clone();
        spawn_local(async move {
            let result = fetch_image(&window, &request).await;
            if let Some(runtime) = weak.upgrade() {
                deliver_image(&runtime, request, result);
            }
        });
    }
}

fn deliver_image(
    runtime: &Rc<Runtime>,
    request: ImageRequest,
    result: Result<ImagePixels, VitrineError>,
) {
    if !runtime.mounted.get() {
        return;
    }
    {
        let Ok(mut gallery) = runtime.gallery.try_borrow_mut() else {
            return;
        };
        let delivered =
            result.and_then(|image| gallery.image_loaded(request.media, &image));
        if let Err(e) = delivered {
            log::warn!("{}: {e}", request.url);
            let _ = gallery.image_failed(request.media);
        }
    }
    spawn_image_loads(runtime);
}

async fn fetch_image(
    window: &Window,
    request: &ImageRequest,
) -> Result<ImagePixels, VitrineError> {
    let js_err = |e: JsValue| VitrineError::Image(format!("{e:?}"));
    let response: Response = JsFuture::from(window.fetch_with_str(&request.url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        return Err(VitrineError::Image(format!(
            "HTTP {} for {}",
            response.status(),
            request.url
        )));
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    ImagePixels::decode(&bytes)
}
