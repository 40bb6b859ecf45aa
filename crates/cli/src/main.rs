use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fuchsian::group::{DiscreteGroup, TopologicalSurface};
use fuchsian::h2::H2Point;
use fuchsian::mesh::{H2Mesh, MeshCfg};
use fuchsian::representation::IsomH2Representation;
use fuchsian::triangulate::H2PolygonTriangulater;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Build surface groups, fundamental polygons and meshes; print JSON reports")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Presentation of the fundamental group of a surface
    Group {
        #[arg(long)]
        genus: usize,
        #[arg(long, default_value_t = 0)]
        punctures: usize,
        /// Also count reduced words of length < L
        #[arg(long)]
        words: Option<usize>,
    },
    /// Mesh of the fundamental polygon of the regular representation
    Mesh {
        #[arg(long)]
        genus: usize,
        #[arg(long, default_value_t = MeshCfg::default().step)]
        step: f64,
        #[arg(long, default_value_t = MeshCfg::default().polygon_precision)]
        precision: usize,
        /// Write the report here, with a provenance sidecar
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Triangulation of the fundamental polygon of the regular representation
    Triangulate {
        #[arg(long)]
        genus: usize,
        #[arg(long, default_value_t = 20)]
        precision: usize,
    },
    /// Print version and code revision
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let doc = match cmd.action {
        Action::Group {
            genus,
            punctures,
            words,
        } => group_report(genus, punctures, words)?,
        Action::Mesh {
            genus,
            step,
            precision,
            out,
        } => {
            let cfg = MeshCfg {
                step,
                polygon_precision: precision,
            };
            let doc = mesh_report(genus, cfg)?;
            if let Some(out) = out {
                let payload = provenance::Payload::new(
                    "mesh",
                    json!({"genus": genus, "step": step, "precision": precision}),
                );
                let sidecar = provenance::write_with_sidecar(&out, &doc, payload)?;
                tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote mesh report");
            }
            doc
        }
        Action::Triangulate { genus, precision } => triangulate_report(genus, precision)?,
        Action::Report => report(),
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[derive(Serialize)]
struct GroupReport {
    genus: usize,
    punctures: usize,
    euler_characteristic: i64,
    hyperbolic: bool,
    presentation: String,
    generators: Vec<String>,
    relations: Vec<String>,
    nb_words_shorter_than: Option<(usize, usize)>,
}

fn group_report(genus: usize, punctures: usize, words: Option<usize>) -> Result<Value> {
    let surface = TopologicalSurface::new(genus, punctures);
    let group = DiscreteGroup::from_surface(&surface);
    tracing::info!(genus, punctures, "group");
    let report = GroupReport {
        genus,
        punctures,
        euler_characteristic: surface.euler_characteristic(),
        hyperbolic: surface.is_hyperbolic(),
        presentation: group.to_string(),
        generators: group.generators().to_vec(),
        relations: group
            .relations()
            .iter()
            .map(|w| group.word_as_string(w))
            .collect(),
        nb_words_shorter_than: words.map(|l| (l, group.words_of_length_less_than(l).len())),
    };
    Ok(serde_json::to_value(report)?)
}

#[derive(Serialize)]
struct MeshReport {
    genus: usize,
    step: f64,
    relator_error: f64,
    polygon: Vec<[f64; 2]>,
    polygon_area: f64,
    nb_points: usize,
    nb_points_x: usize,
    nb_points_y: usize,
    nb_inside: usize,
    glued_left_right_up_down: [usize; 4],
    unresolved_left_right_up_down: [usize; 4],
    nb_special_points: usize,
}

fn regular_representation(genus: usize) -> Result<IsomH2Representation> {
    if genus < 2 {
        bail!("the regular representation needs genus >= 2, got {genus}");
    }
    IsomH2Representation::regular(genus)
        .with_context(|| format!("building the regular genus {genus} representation"))
}

fn disk_pairs(points: &[H2Point]) -> Vec<[f64; 2]> {
    points
        .iter()
        .map(|p| {
            let z = p.disk();
            [z.re, z.im]
        })
        .collect()
}

fn mesh_report(genus: usize, cfg: MeshCfg) -> Result<Value> {
    let rho = regular_representation(genus)?;
    let mesh = H2Mesh::new(cfg, &rho).context("building the mesh")?;
    let report = MeshReport {
        genus,
        step: mesh.step(),
        relator_error: rho.relator_error()?,
        polygon: disk_pairs(mesh.polygon().vertices()),
        polygon_area: mesh.polygon().area(),
        nb_points: mesh.nb_points(),
        nb_points_x: mesh.nb_points_x(),
        nb_points_y: mesh.nb_points_y(),
        nb_inside: mesh.points().len(),
        glued_left_right_up_down: mesh.glued_counts(),
        unresolved_left_right_up_down: mesh.unresolved_counts(),
        nb_special_points: mesh.special_points().len(),
    };
    tracing::info!(genus, nb_inside = report.nb_inside, "mesh");
    Ok(serde_json::to_value(report)?)
}

#[derive(Serialize)]
struct CutReport {
    vertices: [usize; 2],
    left_triangle: usize,
    right_triangle: usize,
}

#[derive(Serialize)]
struct TriangulationReport {
    genus: usize,
    polygon: Vec<[f64; 2]>,
    polygon_area: f64,
    triangles: Vec<[usize; 3]>,
    triangle_area_sum: f64,
    cuts: Vec<CutReport>,
    side_triangles: Vec<usize>,
}

fn triangulate_report(genus: usize, precision: usize) -> Result<Value> {
    let rho = regular_representation(genus)?;
    let polygon = rho
        .generate_polygon(precision)
        .context("generating the fundamental polygon")?;
    let t = H2PolygonTriangulater::new(&polygon);
    let report = TriangulationReport {
        genus,
        polygon: disk_pairs(polygon.vertices()),
        polygon_area: polygon.area(),
        triangles: t.triangles().iter().map(|tr| tr.vertices()).collect(),
        triangle_area_sum: t.h2_triangles().iter().map(|tr| tr.area()).sum(),
        cuts: t
            .cuts()
            .iter()
            .map(|c| CutReport {
                vertices: [c.vertex_index1, c.vertex_index2],
                left_triangle: c.left_triangle_index,
                right_triangle: c.right_triangle_index,
            })
            .collect(),
        side_triangles: t.side_triangle_indices().to_vec(),
    };
    tracing::info!(genus, nb_triangles = report.triangles.len(), "triangulate");
    Ok(serde_json::to_value(report)?)
}

fn report() -> Value {
    json!({
        "code_rev": provenance::current_git_rev(),
        "fuchsian_version": fuchsian::VERSION,
    })
}
