#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod geom;

use std::collections::BTreeMap;
use std::fmt;

use analysis::{
    AnalysisOptions, Results, SampleSet, ScalarSampleSet, SeriesLengthCheck, SurfaceSampleSet,
    VectorSampleSet,
};
use geom::{
    CylinderSurface, PlaneSurface, Point3, SphereSurface, Surface, Tolerance, TrimLoop,
    TrimRegion, TrimmedSurface, UvPoint, Vec3,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Oppervlakbeschrijving zoals die vanuit JavaScript aangeleverd wordt.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SurfaceDescriptor {
    Plane {
        origin: [f64; 3],
        u_axis: [f64; 3],
        v_axis: [f64; 3],
        #[serde(default)]
        trim: Vec<Vec<[f64; 2]>>,
    },
    Cylinder {
        base: [f64; 3],
        axis: [f64; 3],
        radius: f64,
        #[serde(default)]
        trim: Vec<Vec<[f64; 2]>>,
    },
    Sphere {
        center: [f64; 3],
        radius: f64,
        #[serde(default)]
        trim: Vec<Vec<[f64; 2]>>,
    },
}

impl SurfaceDescriptor {
    fn build(self) -> Result<Box<dyn Surface>, String> {
        let (base, trim): (Box<dyn Surface>, _) = match self {
            Self::Plane {
                origin,
                u_axis,
                v_axis,
                trim,
            } => {
                let plane = PlaneSurface::new(Point3::from(origin), Vec3::from(u_axis), Vec3::from(v_axis))?;
                (Box::new(plane) as Box<dyn Surface>, trim)
            }
            Self::Cylinder {
                base,
                axis,
                radius,
                trim,
            } => {
                let cylinder = CylinderSurface::new(Point3::from(base), Vec3::from(axis), radius)?;
                (Box::new(cylinder) as Box<dyn Surface>, trim)
            }
            Self::Sphere { center, radius, trim } => {
                let sphere = SphereSurface::new(Point3::from(center), radius)?;
                (Box::new(sphere) as Box<dyn Surface>, trim)
            }
        };

        if trim.is_empty() {
            return Ok(base);
        }

        let tol = Tolerance::default_geom();
        let loops = trim
            .into_iter()
            .map(|points| TrimLoop::new(points.into_iter().map(UvPoint::from).collect(), tol))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| err.to_string())?;
        let region = TrimRegion::from_loops(loops, tol).map_err(|err| err.to_string())?;
        Ok(Box::new(TrimmedSurface::new(base, region)))
    }
}

#[derive(Debug, Serialize)]
struct SampleSetExport<L, V> {
    locations: Vec<L>,
    results: BTreeMap<String, Vec<V>>,
}

/// Analysegegevens op een oppervlak, bereikbaar vanuit JavaScript.
#[wasm_bindgen]
pub struct SurfaceAnalysis {
    samples: SurfaceSampleSet<Box<dyn Surface>>,
}

#[wasm_bindgen]
impl SurfaceAnalysis {
    /// Bouw een analyse op basis van een oppervlakbeschrijving en `[u, v]` paren.
    /// Locaties die niet op het oppervlak liggen worden verwijderd.
    #[wasm_bindgen(constructor)]
    pub fn new(
        surface: JsValue,
        locations: JsValue,
        strict_lengths: Option<bool>,
    ) -> Result<SurfaceAnalysis, JsValue> {
        let descriptor: SurfaceDescriptor =
            serde_wasm_bindgen::from_value(surface).map_err(to_js_error)?;
        let locations: Vec<[f64; 2]> =
            serde_wasm_bindgen::from_value(locations).map_err(to_js_error)?;
        let options = AnalysisOptions {
            length_check: if strict_lengths.unwrap_or(false) {
                SeriesLengthCheck::Strict
            } else {
                SeriesLengthCheck::Unchecked
            },
            ..AnalysisOptions::default()
        };
        Self::build(descriptor, locations, &options).map_err(|err| js_error(&err))
    }

    /// Aantal locaties dat na het filteren overblijft.
    #[wasm_bindgen]
    pub fn location_count(&self) -> usize {
        self.samples.calculation_locations().len()
    }

    /// Gefilterde locaties als `[u, v]` paren.
    #[wasm_bindgen]
    pub fn calculation_locations(&self) -> Result<JsValue, JsValue> {
        let locations: Vec<[f64; 2]> = self
            .samples
            .calculation_locations()
            .iter()
            .map(|uv| uv.to_array())
            .collect();
        serde_wasm_bindgen::to_value(&locations).map_err(to_js_error)
    }

    /// Zet of vervang een resultaatreeks. Geeft `true` terug bij vervanging.
    #[wasm_bindgen]
    pub fn set_result(&mut self, name: &str, values: Vec<f64>) -> bool {
        self.samples.insert_result(name, values).is_some()
    }

    #[wasm_bindgen]
    pub fn result(&self, name: &str) -> Option<Vec<f64>> {
        self.samples.result(name).map(<[f64]>::to_vec)
    }

    #[wasm_bindgen]
    pub fn remove_result(&mut self, name: &str) -> bool {
        self.samples.remove_result(name).is_some()
    }

    #[wasm_bindgen]
    pub fn result_names(&self) -> Vec<String> {
        self.samples.results().keys().cloned().collect()
    }

    /// Controleer of elke reeks precies één waarde per locatie heeft.
    #[wasm_bindgen]
    pub fn validate(&self) -> Result<(), JsValue> {
        self.samples.validate_result_lengths().map_err(to_js_error)
    }

    /// Volledige export van locaties en resultaten.
    #[wasm_bindgen]
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        let export = SampleSetExport {
            locations: self
                .samples
                .calculation_locations()
                .iter()
                .map(|uv| uv.to_array())
                .collect(),
            results: self.samples.results().clone(),
        };
        serde_wasm_bindgen::to_value(&export).map_err(to_js_error)
    }
}

impl SurfaceAnalysis {
    fn build(
        descriptor: SurfaceDescriptor,
        locations: Vec<[f64; 2]>,
        options: &AnalysisOptions,
    ) -> Result<Self, String> {
        let surface = descriptor.build()?;
        let locations = locations.into_iter().map(UvPoint::from);
        let (samples, diagnostics) =
            SurfaceSampleSet::new_with_diagnostics(surface, locations, Results::new(), options)
                .map_err(|err| err.to_string())?;
        if diagnostics.had_culls() {
            debug_log!(
                "SurfaceAnalysis: {} van {} locaties liggen niet op het oppervlak",
                diagnostics.culled_count,
                diagnostics.input_count
            );
        }
        Ok(Self { samples })
    }
}

/// Puntlocaties met scalaire resultaatreeksen.
#[wasm_bindgen]
pub struct ScalarAnalysis {
    samples: ScalarSampleSet,
}

#[wasm_bindgen]
impl ScalarAnalysis {
    /// `points` is een lijst `[x, y, z]` coördinaten.
    #[wasm_bindgen(constructor)]
    pub fn new(points: JsValue) -> Result<ScalarAnalysis, JsValue> {
        let points = points_from_js(points)?;
        Ok(Self {
            samples: ScalarSampleSet::new(points),
        })
    }

    #[wasm_bindgen]
    pub fn location_count(&self) -> usize {
        self.samples.calculation_locations().len()
    }

    #[wasm_bindgen]
    pub fn set_result(&mut self, name: &str, values: Vec<f64>) -> bool {
        self.samples.insert_result(name, values).is_some()
    }

    #[wasm_bindgen]
    pub fn result(&self, name: &str) -> Option<Vec<f64>> {
        self.samples.result(name).map(<[f64]>::to_vec)
    }

    #[wasm_bindgen]
    pub fn result_names(&self) -> Vec<String> {
        self.samples.results().keys().cloned().collect()
    }

    #[wasm_bindgen]
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        let export = SampleSetExport {
            locations: points_to_arrays(self.samples.calculation_locations()),
            results: self.samples.results().clone(),
        };
        serde_wasm_bindgen::to_value(&export).map_err(to_js_error)
    }
}

/// Puntlocaties met vectorresultaatreeksen.
#[wasm_bindgen]
pub struct VectorAnalysis {
    samples: VectorSampleSet,
}

#[wasm_bindgen]
impl VectorAnalysis {
    /// `points` is een lijst `[x, y, z]` coördinaten.
    #[wasm_bindgen(constructor)]
    pub fn new(points: JsValue) -> Result<VectorAnalysis, JsValue> {
        let points = points_from_js(points)?;
        Ok(Self {
            samples: VectorSampleSet::new(points),
        })
    }

    #[wasm_bindgen]
    pub fn location_count(&self) -> usize {
        self.samples.calculation_locations().len()
    }

    /// Zet of vervang een reeks van `[x, y, z]` vectoren.
    #[wasm_bindgen]
    pub fn set_result(&mut self, name: &str, values: JsValue) -> Result<bool, JsValue> {
        let values: Vec<[f64; 3]> = serde_wasm_bindgen::from_value(values).map_err(to_js_error)?;
        let values = values.into_iter().map(Vec3::from).collect();
        Ok(self.samples.insert_result(name, values).is_some())
    }

    #[wasm_bindgen]
    pub fn result(&self, name: &str) -> Result<JsValue, JsValue> {
        let values: Option<Vec<[f64; 3]>> = self
            .samples
            .result(name)
            .map(|values| values.iter().map(|v| v.to_array()).collect());
        serde_wasm_bindgen::to_value(&values).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn result_names(&self) -> Vec<String> {
        self.samples.results().keys().cloned().collect()
    }

    #[wasm_bindgen]
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        let results: BTreeMap<String, Vec<[f64; 3]>> = self
            .samples
            .results()
            .iter()
            .map(|(name, values)| (name.clone(), values.iter().map(|v| v.to_array()).collect()))
            .collect();
        let export = SampleSetExport {
            locations: points_to_arrays(self.samples.calculation_locations()),
            results,
        };
        serde_wasm_bindgen::to_value(&export).map_err(to_js_error)
    }
}

fn points_from_js(points: JsValue) -> Result<Vec<Point3>, JsValue> {
    let points: Vec<[f64; 3]> = serde_wasm_bindgen::from_value(points).map_err(to_js_error)?;
    Ok(points.into_iter().map(Point3::from).collect())
}

fn points_to_arrays(points: &[Point3]) -> Vec<[f64; 3]> {
    points.iter().map(|p| p.to_array()).collect()
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
