use engine::{
    GameLogic,
    graphics::{CpuRenderer, Renderer2d},
    regression::{
        FrameHashGolden, assert_or_update_golden_json, render_hashes, update_goldens_enabled,
    },
    surface::SurfaceSize,
    ui::Rect,
};

/// A square that slides right by `input` pixels per tick.
#[derive(Debug, Clone)]
struct SlidingSquare {
    side: u32,
}

impl GameLogic for SlidingSquare {
    type State = u32;
    type Input = u32;

    fn initial_state(&self) -> Self::State {
        0
    }

    fn step(&self, state: &mut Self::State, input: Self::Input) {
        *state = state.saturating_add(input);
    }
}

fn draw(side: u32, x: &u32, buf: &mut [u8], size: SurfaceSize) {
    let mut gfx = CpuRenderer::new(buf, size);
    gfx.clear([10, 10, 20, 255]);
    gfx.fill_rect(Rect::new(*x, 2, side, side), [240, 200, 40, 255]);
}

#[test]
fn same_inputs_hash_identically() {
    let size = SurfaceSize::new(16, 8);
    let game = SlidingSquare { side: 3 };
    let side = game.side;

    let a = render_hashes(game.clone(), [1, 2, 3], size, |s, buf, size| draw(side, s, buf, size));
    let b = render_hashes(game, [1, 2, 3], size, |s, buf, size| draw(side, s, buf, size));

    assert_eq!(a.len(), 4, "initial frame plus one per input");
    assert_eq!(a, b);
    assert_ne!(a[0], a[1]);
}

#[test]
fn zero_motion_repeats_the_previous_hash() {
    let size = SurfaceSize::new(16, 8);
    let hashes = render_hashes(SlidingSquare { side: 3 }, [0, 0], size, |s, buf, size| {
        draw(3, s, buf, size)
    });
    assert_eq!(hashes[0], hashes[1]);
    assert_eq!(hashes[1], hashes[2]);
}

#[test]
fn golden_sliding_square_render_hashes_are_stable() {
    let name = "golden_sliding_square_render_hashes_are_stable";
    let size = SurfaceSize::new(16, 8);
    let hashes = render_hashes(SlidingSquare { side: 3 }, [1, 1, 2, 5], size, |s, buf, size| {
        draw(3, s, buf, size)
    });

    let golden_path = engine::regression_golden_path!(name);
    let golden = FrameHashGolden::new(name, size.width, size.height, hashes);
    assert_or_update_golden_json(&golden_path, &golden, update_goldens_enabled()).unwrap_or_else(
        |e| {
            panic!(
                "golden check failed: {e}\n(hint: set WRISTFLAP_UPDATE_GOLDENS=1 to generate/update {})",
                golden_path.display()
            )
        },
    );
}
