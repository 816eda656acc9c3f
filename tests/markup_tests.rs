use page_enhancer::core::{Document, NodeKind};

#[test]
fn server_markup_round_trips() {
    let html = r#"<a href="/fillup/7/delete/" class="secondary" data-confirm>Delete</a>"#;
    let document = Document::parse(html).expect("parse");
    assert_eq!(document.to_html(), html);
}

#[test]
fn void_elements_do_not_swallow_siblings() {
    let document =
        Document::parse(r#"<form><input name="a" data-dtpicker><input name="b"></form>"#)
            .expect("parse");
    let form = document.node(document.root()).expect("root").children()[0];
    assert_eq!(document.node(form).expect("form").children().len(), 2);
    assert_eq!(
        document.to_html(),
        r#"<form><input name="a" data-dtpicker><input name="b"></form>"#
    );
}

#[test]
fn attribute_forms_are_all_supported() {
    let document = Document::parse(
        r#"<canvas DATA-TYPE=line data-labels='["a"]' data-options="{}" data-chartjs/>"#,
    )
    .expect("parse");
    let canvas = document.elements_with_attribute("data-chartjs")[0];
    let element = document.element(canvas).expect("element");

    assert_eq!(element.tag_name(), "canvas");
    assert_eq!(element.attribute("data-type"), Some("line"));
    assert_eq!(element.attribute("data-labels"), Some(r#"["a"]"#));
    assert_eq!(element.attribute("data-options"), Some("{}"));
    assert_eq!(element.attribute("data-chartjs"), Some(""));
}

#[test]
fn duplicate_attributes_keep_the_first_value() {
    let document = Document::parse(r#"<div id="a" id="b"></div>"#).expect("parse");
    assert!(document.find_by_id("a").is_some());
    assert!(document.find_by_id("b").is_none());
}

#[test]
fn character_references_are_decoded_and_re_escaped() {
    let document =
        Document::parse(r#"<p title="&quot;x&quot; &amp; y">1 &lt; 2 &#38; 3</p>"#).expect("parse");
    let p = document.elements_with_attribute("title")[0];

    assert_eq!(
        document.attribute(p, "title").expect("element"),
        Some(r#""x" & y"#)
    );
    assert_eq!(document.text_content(p).expect("text"), "1 < 2 & 3");
    assert_eq!(
        document.to_html(),
        r#"<p title="&quot;x&quot; &amp; y">1 &lt; 2 &amp; 3</p>"#
    );
}

#[test]
fn script_bodies_stay_raw() {
    let html = r#"<script>if (a < b && c) { run("<p>"); }</script><p>after</p>"#;
    let document = Document::parse(html).expect("parse");
    assert_eq!(document.to_html(), html);
    assert_eq!(document.elements_with_attribute("data-confirm").len(), 0);
}

#[test]
fn doctype_and_comments_are_preserved() {
    let html = "<!DOCTYPE html><!-- generated --><html><body></body></html>";
    let document = Document::parse(html).expect("parse");
    let kinds: Vec<_> = document
        .node(document.root())
        .expect("root")
        .children()
        .iter()
        .map(|id| document.node(*id).expect("node").kind())
        .collect();

    assert!(matches!(kinds[0], NodeKind::Doctype(name) if name == "html"));
    assert!(matches!(kinds[1], NodeKind::Comment(text) if text == " generated "));
    assert_eq!(document.to_html(), html);
}

#[test]
fn stray_end_tags_are_ignored() {
    let document = Document::parse("<div><span>x</div></span><p>y</p>").expect("parse");
    assert_eq!(document.to_html(), "<div><span>x</span></div><p>y</p>");
}

#[test]
fn unterminated_markup_is_an_error() {
    for html in ["<div class=\"x", "<!-- open", "<script>run()", "<a href=x"] {
        let err = Document::parse(html).expect_err("must fail");
        assert!(format!("{err}").starts_with("html parse error"), "{html}: {err}");
    }
}

#[test]
fn nested_chart_elements_scan_in_document_order() {
    let document = Document::parse(
        r#"<div data-chartjs data-type="a"><div data-chartjs data-type="b"></div></div><div data-chartjs data-type="c"></div>"#,
    )
    .expect("parse");
    let kinds: Vec<_> = document
        .elements_with_attribute("data-chartjs")
        .into_iter()
        .map(|id| {
            document
                .attribute(id, "data-type")
                .expect("element")
                .map(str::to_owned)
        })
        .collect();
    assert_eq!(
        kinds,
        [Some("a".to_owned()), Some("b".to_owned()), Some("c".to_owned())]
    );
}

#[test]
fn list_items_close_at_the_next_sibling() {
    let document = Document::parse("<ul><li>row 0<li>row 1<li>row 2</ul>").expect("parse");
    let ul = document.node(document.root()).expect("root").children()[0];
    assert_eq!(document.node(ul).expect("ul").children().len(), 3);
    assert_eq!(
        document.to_html(),
        "<ul><li>row 0</li><li>row 1</li><li>row 2</li></ul>"
    );

    let nested =
        Document::parse("<ul><li>a<ul><li>b</ul><li>c</ul>").expect("parse nested list");
    assert_eq!(
        nested.to_html(),
        "<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"
    );
}

#[test]
fn optional_end_tags_are_implied() {
    let cases = [
        (
            "<p>one<p>two<div>three</div>",
            "<p>one</p><p>two</p><div>three</div>",
        ),
        (
            "<dl><dt>k<dd>v<dt>k2<dd>v2</dl>",
            "<dl><dt>k</dt><dd>v</dd><dt>k2</dt><dd>v2</dd></dl>",
        ),
        (
            r#"<select><optgroup label="x"><option>a<optgroup label="y"><option>b</select>"#,
            r#"<select><optgroup label="x"><option>a</option></optgroup><optgroup label="y"><option>b</option></optgroup></select>"#,
        ),
        (
            "<table><tr><td>a<td>b<tr><th>c</table>",
            "<table><tr><td>a</td><td>b</td></tr><tr><th>c</th></tr></table>",
        ),
        (
            "<button><p>x<div>y</div></button>",
            "<button><p>x</p><div>y</div></button>",
        ),
    ];
    for (html, expected) in cases {
        assert_eq!(Document::parse(html).expect("parse").to_html(), expected, "{html}");
    }
}

#[test]
fn long_lists_and_deep_nesting_serialize() {
    let rows: String = (0..20_000).map(|row| format!("<li>row {row}")).collect();
    let document = Document::parse(&format!("<ul>{rows}</ul>")).expect("parse list");
    let ul = document.node(document.root()).expect("root").children()[0];
    assert_eq!(document.node(ul).expect("ul").children().len(), 20_000);
    assert!(document.to_html().ends_with("<li>row 19999</li></ul>"));

    let depth = 50_000;
    let html = format!("{}{}", "<span>".repeat(depth), "</span>".repeat(depth));
    let document = Document::parse(&html).expect("parse nested");
    assert_eq!(document.to_html(), html);
}

#[test]
fn outer_html_covers_one_subtree() {
    let document =
        Document::parse(r#"<ul><li>a<li class="b">b &amp; c</ul>"#).expect("parse");
    let item = document.elements_with_attribute("class")[0];
    assert_eq!(
        document.outer_html(item).expect("outer html"),
        r#"<li class="b">b &amp; c</li>"#
    );
}

#[test]
fn textarea_and_title_bodies_are_text() {
    let document = Document::parse(
        r#"<title>Fill-ups &amp; <b>costs</b></title><textarea name="n"><a data-confirm>x</a> &lt;3</textarea>"#,
    )
    .expect("parse");
    assert!(document.elements_with_attribute("data-confirm").is_empty());

    let textarea = document.elements_with_attribute("name")[0];
    assert_eq!(
        document.text_content(textarea).expect("text"),
        "<a data-confirm>x</a> <3"
    );
    assert_eq!(
        document.to_html(),
        r#"<title>Fill-ups &amp; &lt;b&gt;costs&lt;/b&gt;</title><textarea name="n">&lt;a data-confirm&gt;x&lt;/a&gt; &lt;3</textarea>"#
    );
}
