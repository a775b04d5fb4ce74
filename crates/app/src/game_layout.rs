//! Layout model for the game's on-screen panels.

use taffy::prelude::*;
use taffy::{Layout, LengthPercentageAuto, TaffyError, TaffyTree};

pub struct LayoutNodes {
    root: NodeId,
    status: NodeId,
    main_row: NodeId,
    left_col: NodeId,
    board: NodeId,
    bottom_info: NodeId,
    stats: NodeId,
    controls: NodeId,
    history: NodeId,
    event_log: NodeId,
}

#[derive(Clone, Copy, Debug)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub struct FrameLayout {
    pub status: PanelRect,
    pub board: PanelRect,
    pub stats: PanelRect,
    pub controls: PanelRect,
    pub history: PanelRect,
    pub event_log: PanelRect,
}

impl FrameLayout {
    pub fn panels(&self) -> [PanelRect; 6] {
        [self.status, self.board, self.stats, self.controls, self.history, self.event_log]
    }
}

fn margin_left(value: f32) -> taffy::Rect<LengthPercentageAuto> {
    taffy::Rect { left: length(value), right: zero(), top: zero(), bottom: zero() }
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> Result<LayoutNodes, TaffyError> {
    let status = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(40.0) },
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(20.0) },
        ..Default::default()
    })?;
    let board = taffy.new_leaf(Style {
        flex_grow: 1.0,
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(20.0) },
        ..Default::default()
    })?;
    let stats = taffy.new_leaf(Style { flex_grow: 1.4, ..Default::default() })?;
    let controls =
        taffy.new_leaf(Style { flex_grow: 1.0, margin: margin_left(15.0), ..Default::default() })?;
    let history =
        taffy.new_leaf(Style { flex_grow: 1.4, margin: margin_left(15.0), ..Default::default() })?;
    let bottom_info = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size { width: percent(1.0), height: length(180.0) },
            flex_grow: 0.0,
            ..Default::default()
        },
        &[stats, controls, history],
    )?;
    let left_col = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            flex_grow: 2.0,
            margin: taffy::Rect { left: zero(), right: length(20.0), top: zero(), bottom: zero() },
            ..Default::default()
        },
        &[board, bottom_info],
    )?;
    let event_log =
        taffy.new_leaf(Style { flex_grow: 1.0, margin: margin_left(20.0), ..Default::default() })?;
    let main_row = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size { width: percent(1.0), height: percent(1.0) },
            flex_grow: 1.0,
            ..Default::default()
        },
        &[left_col, event_log],
    )?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: percent(1.0), height: percent(1.0) },
            padding: taffy::Rect {
                left: length(20.0),
                right: length(20.0),
                top: length(20.0),
                bottom: length(20.0),
            },
            ..Default::default()
        },
        &[status, main_row],
    )?;

    Ok(LayoutNodes {
        root,
        status,
        main_row,
        left_col,
        board,
        bottom_info,
        stats,
        controls,
        history,
        event_log,
    })
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<FrameLayout, TaffyError> {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size)?;

    let l_root = taffy.layout(nodes.root)?;
    let l_main = taffy.layout(nodes.main_row)?;
    let l_left = taffy.layout(nodes.left_col)?;
    let l_bottom = taffy.layout(nodes.bottom_info)?;
    let bottom_parents = [l_root, l_main, l_left, l_bottom];

    Ok(FrameLayout {
        status: panel_rect(taffy.layout(nodes.status)?, &[l_root]),
        board: panel_rect(taffy.layout(nodes.board)?, &[l_root, l_main, l_left]),
        stats: panel_rect(taffy.layout(nodes.stats)?, &bottom_parents),
        controls: panel_rect(taffy.layout(nodes.controls)?, &bottom_parents),
        history: panel_rect(taffy.layout(nodes.history)?, &bottom_parents),
        event_log: panel_rect(taffy.layout(nodes.event_log)?, &[l_root, l_main]),
    })
}

fn panel_rect(layout: &Layout, parents: &[&Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}
