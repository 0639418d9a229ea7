use engine::graphics::{CpuRenderer, Renderer2d};
use engine::image::{PixelLayout, RgbImage, Sprite};
use engine::surface::SurfaceSize;
use engine::ui::Rect;

fn px(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
}

#[test]
fn fill_rect_is_clipped_to_the_surface() {
    let (width, height) = (8u32, 6u32);
    let mut frame = vec![0u8; (width * height * 4) as usize];
    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(width, height));

    gfx.fill_rect(Rect::new(6, 4, 10, 10), [255, 0, 0, 255]);

    assert_eq!(px(&frame, width, 7, 5), [255, 0, 0, 255]);
    assert_eq!(px(&frame, width, 5, 5), [0, 0, 0, 0]);
    assert_eq!(px(&frame, width, 7, 3), [0, 0, 0, 0]);
}

#[test]
fn undersized_frame_draws_nothing() {
    let mut frame = vec![0u8; 4];
    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(4, 4));
    gfx.clear([9, 9, 9, 255]);
    gfx.draw_text(0, 0, "HI", [255, 255, 255, 255]);
    assert_eq!(frame, vec![0u8; 4]);
}

#[test]
fn blend_rect_mixes_with_existing_pixels() {
    let (width, height) = (2u32, 1u32);
    let mut frame = vec![0u8; (width * height * 4) as usize];
    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(width, height));

    gfx.clear([0, 0, 0, 255]);
    gfx.blend_rect(Rect::new(0, 0, 1, 1), [255, 255, 255, 255], 128);

    let p = px(&frame, width, 0, 0);
    assert_eq!(p[3], 255);
    assert!((127..=129).contains(&p[0]), "got {p:?}");
    assert_eq!(px(&frame, width, 1, 0), [0, 0, 0, 255]);
}

#[test]
fn blit_rgb_stretches_and_mirrors() {
    // 2x1 image: red on the left, blue on the right.
    let image = RgbImage::from_raw(
        2,
        1,
        PixelLayout::RowMajor,
        vec![255, 0, 0, 0, 0, 255],
    )
    .expect("valid image");

    let (width, height) = (4u32, 2u32);
    let mut frame = vec![0u8; (width * height * 4) as usize];
    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(width, height));

    gfx.blit_rgb(Rect::from_size(width, height), &image, false);
    assert_eq!(px(&frame, width, 0, 1), [255, 0, 0, 255]);
    assert_eq!(px(&frame, width, 3, 0), [0, 0, 255, 255]);

    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(width, height));
    gfx.blit_rgb(Rect::from_size(width, height), &image, true);
    assert_eq!(px(&frame, width, 0, 1), [0, 0, 255, 255]);
    assert_eq!(px(&frame, width, 3, 0), [255, 0, 0, 255]);
}

#[test]
fn blit_rgb_reads_column_major_frames_in_surface_orientation() {
    // Logical 2x2 image with a single white pixel at (1, 0), stored column-major:
    // column 0 = [(0,0), (0,1)], column 1 = [(1,0), (1,1)].
    let mut data = vec![0u8; 12];
    data[6..9].copy_from_slice(&[255, 255, 255]);
    let image = RgbImage::from_raw(2, 2, PixelLayout::ColumnMajor, data).expect("valid image");

    let mut frame = vec![0u8; 2 * 2 * 4];
    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(2, 2));
    gfx.blit_rgb(Rect::from_size(2, 2), &image, false);

    assert_eq!(px(&frame, 2, 1, 0), [255, 255, 255, 255]);
    assert_eq!(px(&frame, 2, 0, 1), [0, 0, 0, 255]);
}

#[test]
fn draw_sprite_skips_transparent_pixels_and_clips_negative_positions() {
    let sprite = Sprite::from_palette_rows(&["10", "01"], &[[0, 255, 0, 255]], 1);

    let (width, height) = (3u32, 3u32);
    let mut frame = vec![0u8; (width * height * 4) as usize];
    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(width, height));
    gfx.clear([1, 1, 1, 255]);

    gfx.draw_sprite(-1, 0, &sprite);

    // Only the sprite's right column lands on screen: (1,1) of the sprite -> (0,1) on screen.
    assert_eq!(px(&frame, width, 0, 1), [0, 255, 0, 255]);
    assert_eq!(px(&frame, width, 0, 0), [1, 1, 1, 255]);
}

#[test]
fn draw_text_marks_pixels_inside_its_measured_box() {
    let (width, height) = (64u32, 16u32);
    let mut frame = vec![0u8; (width * height * 4) as usize];
    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(width, height));

    let size = engine::graphics::text_size("GO", 2);
    gfx.draw_text_scaled(1, 1, "GO", [255, 255, 255, 255], 2);

    let mut lit_outside = false;
    let mut lit_inside = false;
    for y in 0..height {
        for x in 0..width {
            if px(&frame, width, x, y)[0] == 0 {
                continue;
            }
            let inside = x >= 1 && x < 1 + size.w && y >= 1 && y < 1 + size.h;
            lit_inside |= inside;
            lit_outside |= !inside;
        }
    }
    assert!(lit_inside);
    assert!(!lit_outside);
}
