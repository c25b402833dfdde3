use classroom_board::canvas::{CanvasAction, CanvasController};
use classroom_board::file_saver::MemorySaver;
use classroom_board::history::History;
use classroom_board::input::CanvasInput;
use classroom_board::surface::{PixmapSurface, RasterSurface};
use classroom_board::tool::ToolState;
use egui::{Color32, Pos2, pos2};
use proptest::prelude::*;

const SIZE: u32 = 64;

fn create_board() -> CanvasController<PixmapSurface> {
    let surface = PixmapSurface::new(SIZE, SIZE).unwrap();
    CanvasController::new(surface, ToolState::new(Color32::BLACK, 4)).unwrap()
}

fn draw_line(board: &mut CanvasController<PixmapSurface>, from: Pos2, to: Pos2) {
    board.handle_input(CanvasInput::Press(from));
    board.handle_input(CanvasInput::Move(pos2((from.x + to.x) / 2.0, (from.y + to.y) / 2.0)));
    board.handle_input(CanvasInput::Move(to));
    board.handle_input(CanvasInput::Release);
}

fn pixels(board: &CanvasController<PixmapSurface>) -> Vec<u8> {
    board.surface().pixels().to_vec()
}

#[test]
fn test_new_board_is_white_with_one_checkpoint() {
    let board = create_board();

    assert_eq!(board.history().len(), 1);
    assert_eq!(board.history().position(), 0);
    assert!(!board.can_undo());
    assert!(!board.can_redo());
    assert_eq!(board.surface().pixel(0, 0), Some(Color32::WHITE));
    assert_eq!(board.surface().pixel(SIZE - 1, SIZE - 1), Some(Color32::WHITE));
}

#[test]
fn test_three_strokes_then_undo_restores_second() {
    let mut board = create_board();

    draw_line(&mut board, pos2(4.0, 10.0), pos2(60.0, 10.0));
    draw_line(&mut board, pos2(4.0, 30.0), pos2(60.0, 30.0));
    let after_second = pixels(&board);
    draw_line(&mut board, pos2(4.0, 50.0), pos2(60.0, 50.0));
    let after_third = pixels(&board);

    assert_eq!(board.history().len(), 4);
    assert_eq!(board.history().position(), 3);
    assert_eq!(board.surface().pixel(30, 50), Some(Color32::BLACK));

    board.apply(CanvasAction::Undo);
    assert_eq!(board.history().position(), 2);
    assert!(board.surface().has_pending_restore());
    assert!(board.settle());
    assert_eq!(pixels(&board), after_second);
    assert_eq!(board.surface().pixel(30, 50), Some(Color32::WHITE));

    board.apply(CanvasAction::Redo);
    board.settle();
    assert_eq!(board.history().position(), 3);
    assert_eq!(pixels(&board), after_third);
}

#[test]
fn test_new_stroke_after_undo_discards_redo_branch() {
    let mut board = create_board();
    draw_line(&mut board, pos2(4.0, 10.0), pos2(60.0, 10.0));
    draw_line(&mut board, pos2(4.0, 30.0), pos2(60.0, 30.0));
    draw_line(&mut board, pos2(4.0, 50.0), pos2(60.0, 50.0));

    board.undo();
    board.undo();
    assert!(board.can_redo());

    // The press settles the pending restore before the new stroke lands
    draw_line(&mut board, pos2(10.0, 4.0), pos2(10.0, 60.0));

    assert_eq!(board.history().len(), 3);
    assert_eq!(board.history().position(), 2);
    assert!(!board.can_redo());
    assert_eq!(board.surface().pixel(30, 10), Some(Color32::BLACK));
    assert_eq!(board.surface().pixel(30, 30), Some(Color32::WHITE));
    assert_eq!(board.surface().pixel(10, 40), Some(Color32::BLACK));
}

#[test]
fn test_latest_restore_request_wins() {
    let mut board = create_board();
    let blank = pixels(&board);
    draw_line(&mut board, pos2(4.0, 10.0), pos2(60.0, 10.0));
    draw_line(&mut board, pos2(4.0, 30.0), pos2(60.0, 30.0));

    board.undo();
    board.undo();
    assert!(board.settle());

    assert_eq!(board.history().position(), 0);
    assert_eq!(pixels(&board), blank);
    assert!(!board.settle());
}

#[test]
fn test_clear_then_undo_is_bit_identical() {
    let mut board = create_board();
    draw_line(&mut board, pos2(4.0, 4.0), pos2(60.0, 60.0));
    draw_line(&mut board, pos2(60.0, 4.0), pos2(4.0, 60.0));
    let before_clear = pixels(&board);

    board.apply(CanvasAction::Clear);
    assert_eq!(board.history().len(), 4);
    assert!(board.surface().pixels().chunks(4).all(|px| px == [255, 255, 255, 255]));

    board.apply(CanvasAction::Undo);
    board.settle();
    assert_eq!(pixels(&board), before_clear);
}

#[test]
fn test_undo_and_redo_at_bounds_do_nothing() {
    let mut board = create_board();
    board.apply(CanvasAction::Undo);
    assert!(!board.surface().has_pending_restore());
    assert_eq!(board.history().position(), 0);

    draw_line(&mut board, pos2(4.0, 10.0), pos2(60.0, 10.0));
    board.apply(CanvasAction::Redo);
    assert!(!board.surface().has_pending_restore());
    assert_eq!(board.history().position(), 1);
}

#[test]
fn test_press_without_release_records_nothing() {
    let mut board = create_board();
    board.handle_input(CanvasInput::Press(pos2(4.0, 10.0)));
    board.handle_input(CanvasInput::Move(pos2(60.0, 10.0)));

    assert!(board.is_drawing());
    assert_eq!(board.history().len(), 1);

    // Leaving the canvas ends the stroke like a release
    board.handle_input(CanvasInput::Leave);
    assert!(!board.is_drawing());
    assert_eq!(board.history().len(), 2);

    // A stray release is ignored
    board.handle_input(CanvasInput::Release);
    assert_eq!(board.history().len(), 2);
}

#[test]
fn test_eraser_paints_background_and_keeps_width() {
    let mut board = create_board();
    draw_line(&mut board, pos2(4.0, 32.0), pos2(60.0, 32.0));
    assert_eq!(board.surface().pixel(32, 32), Some(Color32::BLACK));

    board.apply(CanvasAction::ToggleEraser);
    assert!(board.tools().eraser_active());
    assert_eq!(board.tools().width(), 4);

    draw_line(&mut board, pos2(32.0, 4.0), pos2(32.0, 60.0));
    assert_eq!(board.surface().pixel(32, 32), Some(Color32::WHITE));
    // Eraser runs three times as wide as the pen
    assert_eq!(board.surface().pixel(36, 32), Some(Color32::WHITE));
    assert_eq!(board.surface().pixel(50, 32), Some(Color32::BLACK));

    // Picking a colour puts the pen back
    board.apply(CanvasAction::SelectColor(Color32::RED));
    assert!(!board.tools().eraser_active());
    draw_line(&mut board, pos2(4.0, 50.0), pos2(60.0, 50.0));
    assert_eq!(board.surface().pixel(30, 50), Some(Color32::RED));
}

#[test]
fn test_download_writes_opaque_jpeg() {
    let mut board = create_board();
    draw_line(&mut board, pos2(4.0, 32.0), pos2(60.0, 32.0));

    let mut saver = MemorySaver::default();
    let name = board.download(&mut saver).unwrap();

    assert!(name.starts_with("drawing_"));
    assert!(name.ends_with(".jpg"));
    assert!(!name.contains(':'));
    assert_eq!(saver.files.len(), 1);
    let (saved_name, bytes) = &saver.files[0];
    assert_eq!(saved_name, &name);
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (SIZE, SIZE));
    let corner = decoded.get_pixel(0, 0);
    assert!(corner.0.iter().all(|channel| *channel > 240));

    // Export does not touch history
    assert_eq!(board.history().len(), 2);
}

#[test]
fn test_download_lands_pending_undo_first() {
    let mut board = create_board();
    draw_line(&mut board, pos2(4.0, 32.0), pos2(60.0, 32.0));
    board.undo();

    let mut saver = MemorySaver::default();
    board.download(&mut saver).unwrap();

    assert!(!board.surface().has_pending_restore());
    let decoded = image::load_from_memory(&saver.files[0].1).unwrap().to_rgb8();
    let middle = decoded.get_pixel(32, 32);
    assert!(middle.0.iter().all(|channel| *channel > 240));
}

#[test]
fn test_undo_during_stroke_keeps_the_stroke() {
    let mut board = create_board();
    draw_line(&mut board, pos2(4.0, 10.0), pos2(60.0, 10.0));

    board.handle_input(CanvasInput::Press(pos2(4.0, 40.0)));
    board.handle_input(CanvasInput::Move(pos2(30.0, 40.0)));
    board.apply(CanvasAction::Undo);
    board.apply(CanvasAction::Redo);
    assert!(!board.surface().has_pending_restore());

    board.handle_input(CanvasInput::Move(pos2(60.0, 40.0)));
    board.settle();
    board.handle_input(CanvasInput::Release);

    assert_eq!(board.surface().pixel(20, 40), Some(Color32::BLACK));
    assert_eq!(board.surface().pixel(50, 40), Some(Color32::BLACK));
    assert_eq!(board.surface().pixel(30, 10), Some(Color32::BLACK));
    assert_eq!(board.history().len(), 3);
    assert_eq!(board.history().position(), 2);

    // Once the stroke is done, undo works again
    board.apply(CanvasAction::Undo);
    board.settle();
    assert_eq!(board.surface().pixel(20, 40), Some(Color32::WHITE));
    assert_eq!(board.surface().pixel(30, 10), Some(Color32::BLACK));
}

#[test]
fn test_resize_keeps_drawing_and_history() {
    let mut board = create_board();
    draw_line(&mut board, pos2(4.0, 10.0), pos2(60.0, 10.0));

    board.resize(128, 96);

    assert_eq!(board.surface().size(), [128, 96]);
    assert_eq!(board.surface().pixel(30, 10), Some(Color32::BLACK));
    assert_eq!(board.surface().pixel(100, 80), Some(Color32::WHITE));
    assert_eq!(board.history().len(), 2);
}

#[test]
fn test_history_evicts_oldest_on_board() {
    let surface = PixmapSurface::new(16, 16).unwrap();
    let mut board =
        CanvasController::with_capacity(surface, ToolState::new(Color32::BLACK, 2), 3).unwrap();

    for y in [2.0, 6.0, 10.0, 14.0] {
        draw_line(&mut board, pos2(1.0, y), pos2(15.0, y));
    }

    assert_eq!(board.history().len(), 3);
    assert_eq!(board.history().position(), 2);

    board.undo();
    board.undo();
    board.settle();
    assert!(!board.can_undo());
    // Oldest surviving checkpoint already holds the first two strokes
    assert_eq!(board.surface().pixel(8, 2), Some(Color32::BLACK));
    assert_eq!(board.surface().pixel(8, 6), Some(Color32::BLACK));
    assert_eq!(board.surface().pixel(8, 10), Some(Color32::WHITE));
}

#[derive(Debug, Clone)]
enum Op {
    Push,
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Push), Just(Op::Undo), Just(Op::Redo)]
}

proptest! {
    #[test]
    fn prop_history_stays_bounded(capacity in 1usize..12, ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut history = History::with_capacity(0u32, capacity);
        let mut next = 1u32;

        for op in ops {
            match op {
                Op::Push => {
                    history.push(next);
                    prop_assert_eq!(*history.current(), next);
                    prop_assert!(!history.can_redo());
                    next += 1;
                }
                Op::Undo => {
                    let before = history.position();
                    let moved = history.undo().is_some();
                    prop_assert_eq!(moved, before > 0);
                }
                Op::Redo => {
                    let before = history.position();
                    let moved = history.redo().is_some();
                    prop_assert_eq!(moved, before + 1 < history.len());
                }
            }
            prop_assert!(history.len() <= capacity);
            prop_assert!(history.position() < history.len());
        }
    }

    #[test]
    fn prop_entries_stay_in_push_order(capacity in 1usize..8, pushes in 1usize..40) {
        let mut history = History::with_capacity(0u32, capacity);
        for value in 1..=pushes as u32 {
            history.push(value);
        }
        let entries: Vec<u32> = history.iter().copied().collect();
        prop_assert!(entries.windows(2).all(|pair| pair[0] + 1 == pair[1]));
        prop_assert_eq!(*entries.last().unwrap(), pushes as u32);
    }
}
