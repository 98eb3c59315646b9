use svg::Document;
use svg::node::element::{Group, Text, Title};

use crate::cut_tree;
use crate::entities::{Container, Rectangle};
use crate::geometry::Orientation;
use crate::geometry::primitives::Rect;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;

pub fn container_to_svg(container: &Container, options: SvgDrawOptions, title: &str) -> Document {
    let bbox = container.bbox();
    let (width, height) = (bbox.width() as f32, bbox.height() as f32);
    let min_dim = f32::min(width, height);

    //5% margin on every side
    let vbox = (-0.05 * width, -0.05 * height, 1.10 * width, 1.10 * height);

    let theme = &options.theme;
    let stroke_width = f32::max(width, height) * 0.001 * theme.stroke_width_multiplier;

    let rectangles = match options.original_layout {
        true => &container.original,
        false => &container.rectangles,
    };

    let label = {
        //print some information on above the left top of the container
        let label_content = format!(
            "bin: {} | width: {} | height: {} | density: {:.3}% | cuts: {} | {}",
            container.index,
            bbox.width(),
            bbox.height(),
            container.density() * 100.0,
            container.cut_log.len(),
            title,
        );
        Text::new(label_content)
            .set("x", 0)
            .set("y", -0.5 * 0.025 * min_dim)
            .set("font-size", min_dim * 0.025)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    //draw container
    let container_group = {
        let title = Title::new(format!(
            "container, index: {}, bbox: [x_min: {}, y_min: {}, x_max: {}, y_max: {}]",
            container.index, bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max
        ));
        Group::new()
            .set("id", format!("container_{}", container.index))
            .add(svg_util::data_to_path(
                svg_util::aa_rect_data(bbox),
                &[
                    ("fill", &*format!("{}", theme.container_fill)),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(title)
    };

    //draw rectangles
    let items_group = rectangles
        .iter()
        .fold(Group::new().set("id", "items"), |group, r| {
            group.add(rectangle_group(r, &options, stroke_width))
        });

    //draw the committed cut log (if enabled)
    let cut_log_group = match options.cut_log {
        false => None,
        true => {
            let group = container.cut_log.iter().fold(
                Group::new().set("id", "cut_log"),
                |group, &y| {
                    group.add(
                        svg_util::data_to_path(
                            svg_util::cut_data(Orientation::Horizontal, y, bbox),
                            &[
                                ("stroke", &*format!("{}", theme.cut_log_color)),
                                ("stroke-width", &*format!("{}", 3.0 * stroke_width)),
                                ("stroke-opacity", "0.6"),
                            ],
                        )
                        .add(Title::new(format!("committed cut, y: {y}"))),
                    )
                },
            );
            Some(group)
        }
    };

    //draw the guillotine cut tree (if enabled)
    let cut_tree_group = match options.cut_tree {
        false => None,
        true => {
            let plan = cut_tree::plan_cuts(rectangles, container.width, container.height);
            let mut group = Group::new().set("id", "cut_tree");
            for (i, (cut, region)) in plan.cuts.iter().zip(plan.regions.iter()).enumerate() {
                group = group.add(
                    svg_util::data_to_path(
                        svg_util::cut_data(cut.orientation, cut.position, *region),
                        &[
                            ("stroke", &*format!("{}", theme.cut_tree_color)),
                            ("stroke-width", &*format!("{}", stroke_width)),
                            (
                                "stroke-dasharray",
                                &*format!("{} {}", 4.0 * stroke_width, 2.0 * stroke_width),
                            ),
                        ],
                    )
                    .add(Title::new(format!("cut #{i}: {cut}"))),
                );
            }
            for region in plan.inseparable.iter() {
                group = group.add(inseparable_region(*region, stroke_width));
            }
            Some(group)
        }
    };

    let optionals = [cut_log_group, cut_tree_group]
        .into_iter()
        .flatten()
        .fold(Group::new().set("id", "optionals"), |g, opt| g.add(opt));

    Document::new()
        .set("viewBox", vbox)
        .add(container_group)
        .add(items_group)
        .add(optionals)
        .add(label)
}

fn rectangle_group(r: &Rectangle, options: &SvgDrawOptions, stroke_width: f32) -> Group {
    let theme = &options.theme;
    let fill = match r.rotated {
        true => theme.rotated_item_fill,
        false => theme.item_fill,
    };
    let title = Title::new(format!(
        "rectangle, id: {}, x: {}, y: {}, w: {}, h: {}, rotated: {}",
        r.id, r.x, r.y, r.w, r.h, r.rotated
    ));
    let mut group = Group::new()
        .set("id", format!("item_{}", r.id))
        .add(svg_util::data_to_path(
            svg_util::aa_rect_data(r.bbox()),
            &[
                ("fill", &*format!("{}", fill)),
                ("stroke-width", &*format!("{}", stroke_width)),
                ("stroke", "black"),
                ("fill-opacity", "0.8"),
            ],
        ))
        .add(title);

    if options.labels {
        let font_size = f32::min(r.w as f32, r.h as f32) * 0.3;
        group = group.add(
            Text::new(format!("{}", r.id))
                .set("x", r.x as f32 + r.w as f32 / 2.0)
                .set("y", r.y as f32 + r.h as f32 / 2.0)
                .set("font-size", font_size)
                .set("font-family", "monospace")
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle"),
        );
    }
    group
}

fn inseparable_region(region: Rect, stroke_width: f32) -> svg::node::element::Path {
    svg_util::data_to_path(
        svg_util::aa_rect_data(region),
        &[
            ("fill", "none"),
            ("stroke", "red"),
            ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ("stroke-dasharray", &*format!("{}", 5.0 * stroke_width)),
        ],
    )
    .add(Title::new("inseparable region"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Piece;

    #[test]
    fn svg_contains_items_and_cuts() {
        let mut container = Container::new(3, 100, 100);
        container.rectangles = vec![
            Piece::new(10, 100, 40).place_at(0, 0),
            Piece::new(11, 50, 60).place_at(0, 40),
        ];
        container.cut_log = vec![40];

        let doc = container_to_svg(&container, SvgDrawOptions::default(), "test").to_string();
        assert!(doc.contains("container_3"));
        assert!(doc.contains("item_10"));
        assert!(doc.contains("item_11"));
        assert!(doc.contains("committed cut, y: 40"));
        assert!(doc.contains("cut #0: H@40"));
    }
}
