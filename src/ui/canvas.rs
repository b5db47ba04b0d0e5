use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::Widget;

use crate::sim::{DrawList, Rgb, Shape};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Paints a recorded frame onto a half-block canvas.
///
/// Logical coordinates run top-down; the canvas runs bottom-up, so every y
/// goes through `flip`.
pub struct DrawListView<'a> {
    list: &'a DrawList,
    width: f64,
    height: f64,
}

impl<'a> DrawListView<'a> {
    pub fn new(list: &'a DrawList, width: f64, height: f64) -> Self {
        Self { list, width, height }
    }

    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    /// Logical height of one half-block row.
    fn row_step(&self, area: Rect) -> f64 {
        self.height / (f64::from(area.height.max(1)) * 2.0)
    }

    fn span(&self, ctx: &mut Context, x1: f64, x2: f64, y: f64, c: Color) {
        let y = self.flip(y);
        ctx.draw(&CanvasLine { x1, y1: y, x2, y2: y, color: c });
    }

    fn paint(&self, ctx: &mut Context, area: Rect) {
        let step = self.row_step(area);
        let cell_w = self.width / f64::from(area.width.max(1));

        for shape in self.list.shapes() {
            match shape {
                Shape::FillRect { rect, color: rgb } => {
                    let c = color(*rgb);
                    let mut y = rect.y;
                    while y < rect.bottom() {
                        self.span(ctx, rect.x, rect.right(), y, c);
                        y += step;
                    }
                }
                Shape::StrokeRect { rect, color: rgb } => {
                    let c = color(*rgb);
                    let corners = [
                        (rect.x, rect.y),
                        (rect.right(), rect.y),
                        (rect.right(), rect.bottom()),
                        (rect.x, rect.bottom()),
                    ];
                    self.outline(ctx, &corners, true, c);
                }
                Shape::Circle { x, y, radius, color: rgb, filled } => {
                    let c = color(*rgb);
                    if *filled {
                        let mut dy = -radius;
                        while dy <= *radius {
                            let half = (radius * radius - dy * dy).max(0.0).sqrt();
                            self.span(ctx, x - half, x + half, y + dy, c);
                            dy += step;
                        }
                    } else {
                        ctx.draw(&Circle { x: *x, y: self.flip(*y), radius: *radius, color: c });
                    }
                }
                Shape::Path { points, color: rgb, closed } => {
                    self.outline(ctx, points, *closed, color(*rgb));
                }
                Shape::Text { x, y, text, color: rgb } => {
                    let left = x - text.chars().count() as f64 * cell_w / 2.0;
                    let line = Line::styled(text.clone(), Style::default().fg(color(*rgb)).add_modifier(Modifier::BOLD));
                    ctx.print(left.max(0.0), self.flip(*y), line);
                }
            }
        }
    }

    fn outline(&self, ctx: &mut Context, points: &[(f64, f64)], closed: bool, c: Color) {
        for pair in points.windows(2) {
            let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
            ctx.draw(&CanvasLine { x1, y1: self.flip(y1), x2, y2: self.flip(y2), color: c });
        }
        if let (true, Some(&(x1, y1)), Some(&(x2, y2))) = (closed && points.len() > 2, points.last(), points.first()) {
            ctx.draw(&CanvasLine { x1, y1: self.flip(y1), x2, y2: self.flip(y2), color: c });
        }
    }
}

impl Widget for DrawListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(|ctx| self.paint(ctx, area))
            .render(area, buf);
    }
}
