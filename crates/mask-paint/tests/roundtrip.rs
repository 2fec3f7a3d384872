//! End-to-end: paint through gestures, persist as a PGM file, reload
//! into a fresh editor and compare cell state.

use mask_paint::{
    CellState, DisplaySurface, EditorConfig, MaskEditor, OverlayRaster, PointerButton,
};

struct Surface {
    width: f64,
    height: f64,
}

impl DisplaySurface for Surface {
    fn viewport(&self) -> Option<(f64, f64)> {
        Some((self.width, self.height))
    }

    fn get_color_raster(&self, _x: usize, _y: usize, w: usize, h: usize) -> Vec<u8> {
        vec![0; w * h * 4]
    }

    fn put_grayscale(&mut self, _raster: &OverlayRaster, _x: usize, _y: usize) {}

    fn composite(&mut self, _raster: &OverlayRaster, _x: usize, _y: usize, _opacity: f32) {}
}

fn surface() -> Surface {
    Surface {
        width: 320.0,
        height: 240.0,
    }
}

#[test]
fn painted_mask_survives_file_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mask_path = dir.path().join("motion-mask.pgm");

    let mut editor = MaskEditor::new(surface(), 16).expect("editor");

    // A brush stroke, an area gesture (given in swapped corner order),
    // and a correction with the secondary button.
    editor.on_pointer_down(40.0, 40.0, PointerButton::Primary, false);
    editor.on_pointer_move(56.0, 40.0);
    editor.on_pointer_move(72.0, 48.0);
    editor.on_pointer_up(72.0, 48.0, PointerButton::Primary);

    editor.on_pointer_down(200.0, 180.0, PointerButton::Primary, true);
    editor.on_pointer_move(120.0, 100.0);
    editor.on_pointer_up(120.0, 100.0, PointerButton::Primary);

    editor.on_pointer_down(140.0, 120.0, PointerButton::Secondary, false);
    editor.on_pointer_up(140.0, 120.0, PointerButton::Secondary);

    editor.save_mask(&mask_path).expect("save");

    let mut restored = MaskEditor::new(surface(), 16).expect("editor");
    restored.load_mask(&mask_path).expect("load");

    let grid = editor.grid();
    let other = restored.grid();
    assert_eq!((grid.rows(), grid.cols()), (other.rows(), other.cols()));
    for row in 0..=grid.rows() {
        for col in 0..=grid.cols() {
            assert_eq!(
                other.cell(row, col),
                grid.cell(row, col),
                "cell ({row},{col}) diverged after reload"
            );
        }
    }

    // The corrected cell really is included again.
    let (r, c) = grid.pointer_to_cell(140.0, 120.0);
    assert_eq!(other.cell(r, c), CellState::Included);
}

#[test]
fn config_drives_editor_construction() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg_path = dir.path().join("editor.json");

    let cfg = EditorConfig {
        cell_size: 20,
        brush_cells: 1,
        mask_path: None,
    };
    cfg.write_json(&cfg_path).expect("write config");

    let cfg = EditorConfig::load_json(&cfg_path).expect("read config");
    let editor = MaskEditor::with_config(surface(), &cfg).expect("editor");
    assert_eq!(editor.grid().cell_size(), 20);
    assert_eq!(editor.brush_cells(), 1);
}

#[test]
fn foreign_pgm_masks_import_through_resampling() {
    // A mask written by some other tool at full image resolution.
    let mut bytes = b"P5\n# motion mask\n320 240\n255\n".to_vec();
    let mut payload = vec![255u8; 320 * 240];
    for row in 0..240 {
        for col in 0..160 {
            payload[row * 320 + col] = 0; // left half masked out
        }
    }
    bytes.extend_from_slice(&payload);

    let mut editor = MaskEditor::new(surface(), 16).expect("editor");
    editor.set_mask_bytes(&bytes).expect("import");

    let grid = editor.grid();
    assert_eq!(grid.cell(0, 0), CellState::Excluded);
    assert_eq!(grid.cell(grid.rows(), grid.cols()), CellState::Included);
}
