use std::cmp::Ordering;
use std::env;
use std::process::Command;

// Backends this crate can compile, lowest priority number wins.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
enum BackendKind {
    Avx2,
    Avx,
    Sse,
    Neon,
    Portable,
}

impl BackendKind {
    fn priority(&self) -> usize {
        match self {
            BackendKind::Avx2 => 0,
            BackendKind::Avx => 1,
            BackendKind::Sse => 2,
            BackendKind::Neon => 3,
            BackendKind::Portable => usize::MAX,
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "avx2" => Some(BackendKind::Avx2),
            "avx" => Some(BackendKind::Avx),
            "sse" | "sse2" | "sse4" | "sse4.1" => Some(BackendKind::Sse),
            "neon" => Some(BackendKind::Neon),
            "portable" | "fallback" | "scalar" => Some(BackendKind::Portable),
            _ => None,
        }
    }

    // Cumulative cfg flags: an avx2 build also compiles the avx and sse paths.
    fn cfg_flags(&self) -> &'static [&'static str] {
        match self {
            BackendKind::Avx2 => &["sse", "avx", "avx2"],
            BackendKind::Avx => &["sse", "avx"],
            BackendKind::Sse => &["sse"],
            BackendKind::Neon => &["neon"],
            BackendKind::Portable => &[],
        }
    }
}

impl Ord for BackendKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for BackendKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// CPU features relevant to the register backends
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    target_feature: &'static str,
    declared: bool,
    detected: bool,
}

impl CpuFeature {
    fn x86_features() -> Vec<CpuFeature> {
        ["sse2", "sse3", "ssse3", "sse4.1", "avx", "avx2", "fma"]
            .into_iter()
            .map(|name| CpuFeature {
                name: match name {
                    "sse4.1" => "sse4_1",
                    "sse3" => "pni",
                    other => other,
                },
                target_feature: name,
                declared: false,
                detected: false,
            })
            .collect()
    }

    fn arm_features() -> Vec<CpuFeature> {
        vec![CpuFeature {
            name: "neon",
            target_feature: "neon",
            declared: false,
            detected: false,
        }]
    }
}

// Feature detection trait to make implementations more modular
trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                // aarch64 kernels report NEON as "asimd"
                feature.detected = contents
                    .split_whitespace()
                    .any(|flag| flag == feature.name || (feature.name == "neon" && flag == "asimd"));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                feature.detected = match feature.name {
                    "avx2" => contents.contains("hw.optional.avx2_0: 1"),
                    "avx" => contents.contains("hw.optional.avx1_0: 1"),
                    "fma" => contents.contains("hw.optional.fma: 1"),
                    "sse4_1" => contents.contains("hw.optional.sse4_1: 1"),
                    "ssse3" => contents.contains("hw.optional.supplementalsse3: 1"),
                    "pni" => contents.contains("hw.optional.sse3: 1"),
                    "sse2" => contents.contains("hw.optional.sse2: 1"),
                    "neon" => contents.contains("hw.optional.neon: 1"),
                    _ => false,
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    // Features the target is compiled for, as reported by cargo.
    fn declare_target_features(features: &mut [CpuFeature]) {
        let declared = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
        let declared: Vec<&str> = declared.split(',').collect();

        for feature in features.iter_mut() {
            feature.declared = declared.contains(&feature.target_feature);
        }
    }

    fn supported_backends(arch: &str, features: &[CpuFeature]) -> Vec<BackendKind> {
        let declared = |name: &str| {
            features
                .iter()
                .any(|feature| feature.target_feature == name && feature.declared)
        };

        let mut backends = vec![BackendKind::Portable];

        match arch {
            "x86" | "x86_64" => {
                if declared("sse2") {
                    backends.push(BackendKind::Sse);
                }
                if declared("avx") {
                    backends.push(BackendKind::Avx);
                }
                if declared("avx2") {
                    backends.push(BackendKind::Avx2);
                }
            }
            // The NEON kernels use AArch64-only intrinsics.
            "aarch64" => {
                if declared("neon") {
                    backends.push(BackendKind::Neon);
                }
            }
            _ => {}
        }

        backends.sort();
        backends
    }

    fn select(supported: &[BackendKind]) -> BackendKind {
        let best = supported.first().copied().unwrap_or(BackendKind::Portable);

        if env::var_os("CARGO_FEATURE_PORTABLE").is_some() {
            return BackendKind::Portable;
        }

        match env::var("SIMDVEC_BACKEND") {
            Ok(requested) => match BackendKind::parse(&requested) {
                Some(kind) if supported.contains(&kind) => kind,
                Some(kind) => {
                    println!(
                        "cargo:warning=SIMDVEC_BACKEND={requested} ({kind:?}) is not supported by the target features, using {best:?}"
                    );
                    best
                }
                None => {
                    println!(
                        "cargo:warning=unknown SIMDVEC_BACKEND={requested}, expected one of portable, sse, avx, avx2, neon"
                    );
                    best
                }
            },
            Err(_) => best,
        }
    }

    fn apply(arch: &str, features: &[CpuFeature], backend: BackendKind) {
        let declared = |name: &str| {
            features
                .iter()
                .any(|feature| feature.target_feature == name && feature.declared)
        };

        println!("applying: {backend:?}");

        for flag in backend.cfg_flags() {
            println!("cargo:rustc-cfg={flag}");
        }

        // Capability flags refine the x86 register paths.
        if backend.cfg_flags().contains(&"sse") {
            for (feature, flag) in [("sse3", "sse3"), ("ssse3", "ssse3"), ("sse4.1", "sse41")] {
                if declared(feature) {
                    println!("cargo:rustc-cfg={flag}");
                }
            }
        }

        let fma_disabled = env::var("SIMDVEC_FMA").map(|v| v == "0").unwrap_or(false);
        let fma_available = declared("fma") || arch == "aarch64";
        if fma_available && !fma_disabled {
            println!("cargo:rustc-cfg=fma");
        }

        for flag in ["sse", "avx", "avx2", "neon", "sse3", "ssse3", "sse41", "fma"] {
            println!("cargo::rustc-check-cfg=cfg({flag})");
        }
    }

    // Tells the user about register features the host has but the build does not use.
    fn report_unused(features: &[CpuFeature]) {
        let unused: Vec<&str> = features
            .iter()
            .filter(|feature| feature.detected && !feature.declared)
            .map(|feature| feature.target_feature)
            .collect();

        if !unused.is_empty() {
            println!(
                "host supports [{}] which the target does not enable, build with RUSTFLAGS=\"-C target-cpu=native\" to use them",
                unused.join(", ")
            );
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SIMDVEC_BACKEND");
    println!("cargo:rerun-if-env-changed=SIMDVEC_FMA");

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let mut features = match arch.as_str() {
        "x86" | "x86_64" => CpuFeature::x86_features(),
        "aarch64" => CpuFeature::arm_features(),
        _ => Vec::new(),
    };

    PlatformDetector::declare_target_features(&mut features);

    // Host detection only makes sense for native builds
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
        PlatformDetector::report_unused(&features);
    }

    let supported = PlatformDetector::supported_backends(&arch, &features);
    let backend = PlatformDetector::select(&supported);

    PlatformDetector::apply(&arch, &features, backend);
}
