//! Navigation Listeners
//!
//! Wires DOM events to the router: clicks on flagged anchors anywhere in the
//! document, `popstate` on the window, and submissions of the sign-in and
//! registration forms.

use authshell::session::{failure_message, FORM_ERROR_ID};
use authshell::{AuthForm, NavigationEvent, RenderCycle, Router, Session};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, FormData, HtmlFormElement, MouseEvent, Window};

use crate::dom::{WebBrowser, WebDocument};

pub type WebRouter = Router<WebBrowser, WebDocument>;

/// Drive a render cycle on the browser event loop
pub fn spawn_cycle(cycle: RenderCycle) {
    wasm_bindgen_futures::spawn_local(async move {
        match cycle.await {
            Ok(outcome) => tracing::debug!(?outcome, "Render cycle finished"),
            Err(e) => tracing::warn!(error = %e, "Render cycle aborted"),
        }
    });
}

/// Primary-button click with no modifier the browser gives its own meaning to
pub fn is_plain_click(event: &MouseEvent) -> bool {
    !event.default_prevented()
        && event.button() == 0
        && !(event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key())
}

/// The element matching `selector` at or above the event target
pub fn flagged_anchor(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    target
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}

/// Register the click and popstate listeners
///
/// Listeners live for the page's lifetime.
pub fn bind_navigation_interception(
    window: &Window,
    router: Rc<WebRouter>,
    link_attribute: &str,
) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    // On click
    let selector = format!("[{}]", link_attribute);
    let click_router = Rc::clone(&router);
    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        if !is_plain_click(&event) {
            return;
        }
        let Some(anchor) = flagged_anchor(event.target(), &selector) else {
            return;
        };

        let dispatch = click_router.handle(NavigationEvent::LinkClick {
            href: anchor.get_attribute("href"),
        });
        if dispatch.prevents_default() {
            event.prevent_default();
        }
        if let Some(cycle) = dispatch.into_cycle() {
            spawn_cycle(cycle);
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    // On history pop
    let pop_router = Rc::clone(&router);
    let on_pop = Closure::wrap(Box::new(move |_: JsValue| {
        if let Some(cycle) = pop_router.handle(NavigationEvent::PopState).into_cycle() {
            spawn_cycle(cycle);
        }
    }) as Box<dyn FnMut(JsValue)>);
    window.add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref())?;
    on_pop.forget();

    tracing::debug!(attribute = link_attribute, "Navigation listeners bound");
    Ok(())
}

/// Read a submitted form the shell owns
pub fn auth_form(form: &HtmlFormElement) -> Option<AuthForm> {
    let data = FormData::new_with_form(form).ok()?;
    AuthForm::from_fields(&form.id(), |name| data.get(name).as_string())
}

fn show_form_error(form: &HtmlFormElement, message: &str) {
    match form.query_selector(&format!("#{}", FORM_ERROR_ID)) {
        Ok(Some(el)) => el.set_text_content(Some(message)),
        _ => tracing::warn!(form = %form.id(), message, "Form has no error slot"),
    }
}

/// Register the sign-in and registration submit listener
///
/// A successful submission navigates to the profile view.
pub fn bind_form_submission(
    window: &Window,
    router: Rc<WebRouter>,
    session: Rc<Session>,
) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let on_submit = Closure::wrap(Box::new(move |event: Event| {
        let Some(form) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };
        let Some(submission) = auth_form(&form) else {
            return;
        };
        event.prevent_default();
        show_form_error(&form, "");

        let router = Rc::clone(&router);
        let session = Rc::clone(&session);
        wasm_bindgen_futures::spawn_local(async move {
            let username = submission.username().to_string();
            match session.submit(submission).await {
                Ok(next) => match router.navigate_to(next) {
                    Ok(cycle) => spawn_cycle(cycle),
                    Err(e) => tracing::error!(error = %e, "Navigation after sign-in failed"),
                },
                Err(e) => {
                    tracing::warn!(username = %username, error = %e, "Sign-in failed");
                    show_form_error(&form, &failure_message(&e));
                }
            }
        });
    }) as Box<dyn FnMut(Event)>);
    document.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    tracing::debug!("Form listener bound");
    Ok(())
}
