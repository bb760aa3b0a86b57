use std::rc::Rc;

use anyhow::Context;
use una_engine::logging::{init_logging, LoggingConfig};
use una_engine::text::FontSystem;
use una_ui::prelude::*;

const TOOLBAR: &str = include_str!("../ui/toolbar.uss");

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let context = match std::env::args().nth(1) {
        Some(path) => {
            let bytes = std::fs::read(&path).with_context(|| format!("reading font {path}"))?;
            let mut fonts = FontSystem::new();
            fonts.load_font(&bytes).with_context(|| format!("loading font {path}"))?;
            log::info!("measuring text with {path}");
            RenderContext::new(fonts)
        }
        None => RenderContext::new(FixedAdvance::default()),
    };

    let sheet = StyleSheet::parse(TOOLBAR).context("parsing toolbar stylesheet")?;
    let mut tree = NodeTree::new();
    let toolbar = build_toolbar(&mut tree, Rc::new(sheet))?;

    let mut ui = UiRoot::new(UiConfig::new().drag_threshold(2.0), context);

    // Scripted session: hover the first item, drag it onto the second, click,
    // then wheel over the toolbar.
    let script = [
        ("idle", UiInput::default()),
        ("hover", UiInput::at(Vec2::new(24.0, 24.0))),
        ("press", UiInput::at(Vec2::new(24.0, 24.0)).with_left_down()),
        ("drag", UiInput::at(Vec2::new(60.0, 24.0)).with_left_down()),
        ("drop", UiInput::at(Vec2::new(60.0, 24.0)).with_click(MouseButton::Left)),
        ("click", UiInput::at(Vec2::new(60.0, 24.0)).with_click(MouseButton::Left)),
        ("scroll", UiInput::at(Vec2::new(60.0, 24.0)).with_scroll(1.0)),
    ];

    let mut draw_list = DrawList::new();
    for (label, input) in &script {
        draw_list.clear();
        ui.render(&mut tree, toolbar, &mut draw_list, Vec2::new(10.0, 10.0), input)
            .with_context(|| format!("rendering frame '{label}'"))?;
        log::info!("frame '{label}': {}", summarize(&draw_list));
    }

    let order: Vec<_> = tree.children(toolbar).iter().filter_map(|&n| tree.value(n).map(str::to_owned)).collect();
    log::info!("final item order: {}", order.join(" "));
    for (name, rect) in ui.context.clips.iter() {
        log::info!("clip region '{name}': {rect:?}");
    }

    tree.dispose(toolbar);
    if ui.render(&mut tree, toolbar, &mut draw_list, Vec2::zero(), &UiInput::default()).is_err() {
        log::info!("toolbar disposed; {} clip regions left", ui.context.clips.len());
    }
    Ok(())
}

fn build_toolbar(tree: &mut NodeTree, sheet: Rc<StyleSheet>) -> anyhow::Result<NodeId> {
    let mut items = Vec::new();
    for label in ["A", "B", "C"] {
        let item = tree
            .build()
            .class("item")
            .value(label)
            .on(NodeEvent::Click, move |_, _| log::info!("clicked {label}"))
            .on(NodeEvent::MouseEnter, move |_, _| log::debug!("entered {label}"))
            .finish()?;
        items.push(item);
    }

    let separator = tree.build().kind(NodeKind::Separator).finish()?;
    let progress = tree
        .build()
        .kind(NodeKind::ProgressBar { value: 0.0, max: 100.0 })
        .on(NodeEvent::BeforeDraw, |tree, id| {
            if let Some(NodeKind::ProgressBar { value, max }) = tree.kind(id) {
                let _ = tree.set_kind(id, NodeKind::ProgressBar { value: (value + 20.0).min(max), max });
            }
        })
        .finish()?;

    let toolbar = tree
        .build()
        .id("toolbar")
        .clip_key("toolbar")
        .sortable(true)
        .stylesheet(sheet)
        .children(items)
        .child(separator)
        .child(progress)
        .on(NodeEvent::Sorted, |tree, id| log::info!("toolbar reordered: {} children", tree.children(id).len()))
        .finish()?;

    // Keep the separator and the progress bar after the sortable items.
    tree.set_sort_index(separator, 100)?;
    tree.set_sort_index(progress, 101)?;
    Ok(toolbar)
}

fn summarize(draw_list: &DrawList) -> String {
    let (mut rects, mut lines, mut images, mut texts) = (0, 0, 0, 0);
    for item in draw_list.items() {
        match item.cmd {
            DrawCmd::FilledRect(_) | DrawCmd::GradientRect(_) | DrawCmd::RectOutline(_) => rects += 1,
            DrawCmd::Line(_) => lines += 1,
            DrawCmd::Image(_) => images += 1,
            DrawCmd::Text(_) => texts += 1,
        }
    }
    format!("{} commands ({rects} rects, {lines} lines, {images} images, {texts} texts)", draw_list.len())
}
