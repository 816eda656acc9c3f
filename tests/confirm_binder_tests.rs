use page_enhancer::api::{EnhancerConfig, PageEnhancer};
use page_enhancer::core::Document;
use page_enhancer::interaction::{
    ActionListener, ActionOutcome, ConfirmPrompt, HandlerBinding, ScriptedPrompt,
};
use page_enhancer::render::{NullChartBackend, NullPickerBackend};

const PAGE: &str = r#"
<ul>
  <li><a href="/fillup/1/" class="secondary">Open</a></li>
  <li><a href="/fillup/1/delete/" class="secondary" data-confirm>Delete</a></li>
</ul>
"#;

fn enhancer(config: EnhancerConfig) -> PageEnhancer<NullPickerBackend, NullChartBackend> {
    PageEnhancer::new(
        config,
        NullPickerBackend::default(),
        NullChartBackend::default(),
    )
    .expect("enhancer init")
}

fn link(document: &Document, href: &str) -> page_enhancer::core::NodeId {
    document
        .descendants(document.root())
        .find(|node| {
            document
                .element(*node)
                .is_ok_and(|element| element.attribute("href") == Some(href))
        })
        .expect("link present")
}

#[derive(Debug)]
struct Veto;

impl ActionListener for Veto {
    fn on_action(&mut self, _prompt: &mut dyn ConfirmPrompt) -> ActionOutcome {
        ActionOutcome::Suppressed
    }
}

#[test]
fn marked_element_prompts_once_and_follows_answer() {
    let mut document = Document::parse(PAGE).expect("parse");
    let mut enhancer = enhancer(EnhancerConfig::default());
    let report = enhancer.on_load(&mut document).expect("load");
    assert_eq!(report.confirm_bound, 1);

    let delete = link(&document, "/fillup/1/delete/");
    assert!(document.element(delete).expect("element").has_action_handlers());
    let mut prompt = ScriptedPrompt::new([true, false]);

    let accepted = document
        .dispatch_action(delete, &mut prompt)
        .expect("dispatch");
    assert!(accepted.proceeds());
    assert_eq!(prompt.asked(), ["Are you sure?"]);

    let declined = document
        .dispatch_action(delete, &mut prompt)
        .expect("dispatch");
    assert!(!declined.proceeds());
    assert_eq!(prompt.asked().len(), 2);
}

#[test]
fn unmarked_element_never_prompts() {
    let mut document = Document::parse(PAGE).expect("parse");
    let mut enhancer = enhancer(EnhancerConfig::default());
    enhancer.on_load(&mut document).expect("load");

    let open = link(&document, "/fillup/1/");
    assert!(!document.element(open).expect("element").has_action_handlers());
    let mut prompt = ScriptedPrompt::new([false]);
    let outcome = document.dispatch_action(open, &mut prompt).expect("dispatch");

    assert_eq!(outcome, ActionOutcome::Proceed);
    assert!(prompt.asked().is_empty());
    assert_eq!(prompt.remaining(), 1);
}

#[test]
fn configured_message_is_used_for_every_element() {
    let mut document = Document::parse(
        r#"<form data-confirm><button data-confirm="ignored text">Go</button></form>"#,
    )
    .expect("parse");
    let mut enhancer = enhancer(EnhancerConfig::default().with_confirm_message("Really delete?"));
    let report = enhancer.on_load(&mut document).expect("load");
    assert_eq!(report.confirm_bound, 2);

    let button = document
        .elements_with_attribute("data-confirm")
        .last()
        .copied()
        .expect("button");
    let mut prompt = ScriptedPrompt::new([true]);
    document.dispatch_action(button, &mut prompt).expect("dispatch");
    assert_eq!(prompt.asked(), ["Really delete?"]);
}

#[test]
fn listener_binding_keeps_existing_slot_handler() {
    let mut document = Document::parse(PAGE).expect("parse");
    let delete = link(&document, "/fillup/1/delete/");
    document
        .set_slot_handler(delete, Box::new(Veto))
        .expect("slot handler");

    let mut enhancer = enhancer(EnhancerConfig::default());
    enhancer.on_load(&mut document).expect("load");

    let element = document.element(delete).expect("element");
    assert!(element.has_slot_handler());
    assert_eq!(element.listener_count(), 1);

    let mut prompt = ScriptedPrompt::new([true]);
    let outcome = document.dispatch_action(delete, &mut prompt).expect("dispatch");
    assert_eq!(outcome, ActionOutcome::Suppressed);
    assert_eq!(prompt.asked().len(), 1);
}

#[test]
fn replace_slot_binding_clobbers_existing_slot_handler() {
    let mut document = Document::parse(PAGE).expect("parse");
    let delete = link(&document, "/fillup/1/delete/");
    document
        .set_slot_handler(delete, Box::new(Veto))
        .expect("slot handler");

    let mut enhancer =
        enhancer(EnhancerConfig::default().with_confirm_binding(HandlerBinding::ReplaceSlot));
    enhancer.on_load(&mut document).expect("load");

    let element = document.element(delete).expect("element");
    assert!(element.has_slot_handler());
    assert_eq!(element.listener_count(), 0);

    let mut prompt = ScriptedPrompt::new([true]);
    let outcome = document.dispatch_action(delete, &mut prompt).expect("dispatch");
    assert_eq!(outcome, ActionOutcome::Proceed);
}

#[test]
fn markup_inside_textarea_and_title_is_not_bound() {
    let mut document = Document::parse(
        r#"<title><a data-confirm>t</a></title>
        <textarea name="notes"><a data-confirm>x</a></textarea>
        <button data-confirm>Delete</button>"#,
    )
    .expect("parse");
    let mut enhancer = enhancer(EnhancerConfig::default());

    let report = enhancer.on_load(&mut document).expect("load");
    assert_eq!(report.confirm_bound, 1);
}
