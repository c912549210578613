use choroplethcore::render::{RegionElement, Scene, SceneElement, Transform};
use choroplethcore::view::Rgb;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Pixels, Point, Rectangle, Renderer, Theme,
};

pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.r, rgb.g, rgb.b)
}

/// Draws a [`Scene`]. Holds no state; pointer events are handled by the
/// surrounding mouse area.
#[derive(Clone)]
pub struct MapCanvas {
    scene: Scene,
    background: Color,
    label: Color,
}

impl MapCanvas {
    pub fn new(scene: Scene, background: Rgb, label: Rgb) -> Self {
        Self {
            scene,
            background: to_color(background),
            label: to_color(label),
        }
    }
}

impl<Message> canvas::Program<Message> for MapCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), self.background);

        for element in &self.scene.elements {
            match element {
                SceneElement::Placeholder { label, position } => {
                    // roughly centers the label; canvas text has no measuring
                    let offset = label.chars().count() as f32 * 4.0;
                    frame.fill_text(canvas::Text {
                        content: label.clone(),
                        position: Point::new(position.x as f32 - offset, position.y as f32 - 8.0),
                        color: self.label,
                        size: Pixels(16.0),
                        ..canvas::Text::default()
                    });
                }
                SceneElement::Region(region) => {
                    let path = region_path(region, &self.scene.transform);
                    frame.fill(&path, to_color(region.style.fill));
                    frame.stroke(
                        &path,
                        Stroke::default()
                            .with_width(region.style.stroke_width)
                            .with_color(to_color(region.style.stroke)),
                    );
                }
            }
        }

        vec![frame.into_geometry()]
    }
}

fn region_path(region: &RegionElement, transform: &Transform) -> Path {
    Path::new(|builder| {
        for ring in &region.rings {
            for (i, projected) in ring.iter().enumerate() {
                let screen = transform.apply(*projected);
                let point = Point::new(screen.x as f32, screen.y as f32);
                if i == 0 {
                    builder.move_to(point);
                } else {
                    builder.line_to(point);
                }
            }
            builder.close();
        }
    })
}
