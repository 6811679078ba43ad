use crate::{
    assets::{
        decode::DecodedImage,
        fetch::{HttpIconFetcher, IconFetcher},
    },
    code::{
        matrix::ModuleMatrix,
        source::{MatrixSource, QrMatrixSource},
    },
    encode::png::{PNG_CONTENT_TYPE, encode_png},
    foundation::{config::ServiceConfig, core::Canvas, error::BluesquareResult},
    icons::select::{IconSelector, IconSpec},
    identity::resolve::{DirectoryResolver, IdentityResolver},
    render::{composite::compose, raster::rasterize},
    session::links::validate_profile_ref,
};

/// Encoded output of one pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// PNG bytes.
    pub bytes: Vec<u8>,
    /// Edge length of the square image in pixels.
    pub size: u32,
}

impl RenderedImage {
    /// MIME type of [`RenderedImage::bytes`].
    pub fn content_type(&self) -> &'static str {
        PNG_CONTENT_TYPE
    }
}

/// Rasterize `matrix` at `size` and overlay `icon` when present.
pub fn render_code(
    matrix: &ModuleMatrix,
    size: u32,
    icon: Option<&DecodedImage>,
) -> BluesquareResult<Canvas> {
    let base = rasterize(matrix, size)?;
    Ok(compose(base, icon))
}

/// Fetch the icon for `spec`, degrading every failure to "no icon".
pub fn fetch_icon<F: IconFetcher + ?Sized>(
    fetcher: &F,
    spec: &IconSpec,
    cfg: &ServiceConfig,
) -> Option<DecodedImage> {
    let url = spec.url(cfg)?;
    match fetcher.fetch(&url) {
        Ok(icon) => Some(icon),
        Err(err) => {
            tracing::warn!(%url, %err, "icon fetch failed; rendering without icon");
            None
        }
    }
}

/// Profile code service: identity lookup, QR encoding, icon overlay, PNG encoding.
///
/// Holds no per-request state; every call builds and consumes its own canvas.
#[derive(Debug)]
pub struct Bluesquare<R, F, M = QrMatrixSource> {
    config: ServiceConfig,
    resolver: R,
    fetcher: F,
    matrix_source: M,
}

impl Bluesquare<DirectoryResolver, HttpIconFetcher, QrMatrixSource> {
    /// Service backed by the network collaborators described in `config`.
    pub fn from_config(config: ServiceConfig) -> Self {
        let resolver = DirectoryResolver::from_config(&config);
        let fetcher = HttpIconFetcher::from_config(&config);
        let matrix_source = QrMatrixSource::new(config.quiet_zone);
        Self::new(config, resolver, fetcher, matrix_source)
    }
}

impl<R, F, M> Bluesquare<R, F, M>
where
    R: IdentityResolver,
    F: IconFetcher,
    M: MatrixSource,
{
    /// Assemble a service from explicit collaborators.
    pub fn new(config: ServiceConfig, resolver: R, fetcher: F, matrix_source: M) -> Self {
        Self {
            config,
            resolver,
            fetcher,
            matrix_source,
        }
    }

    /// Configuration this service was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Encode `payload` and overlay the icon named by `icon`.
    ///
    /// Icon fetch failures are logged and yield the plain code.
    #[tracing::instrument(skip(self))]
    pub fn render_payload(&self, payload: &str, icon: &IconSpec) -> BluesquareResult<RenderedImage> {
        let matrix = self.matrix_source.encode(payload)?;
        let fetched = fetch_icon(&self.fetcher, icon, &self.config);
        let canvas = render_code(&matrix, self.config.canvas_size, fetched.as_ref())?;
        let bytes = encode_png(&canvas)?;
        Ok(RenderedImage {
            bytes,
            size: self.config.canvas_size,
        })
    }

    /// Resolve `handle_or_did` and render the code for its profile link.
    ///
    /// Only identity resolution (and invalid input) can fail the call; see
    /// [`Bluesquare::render_payload`] for icon handling.
    #[tracing::instrument(skip(self))]
    pub fn render_profile(
        &self,
        handle_or_did: &str,
        selector: Option<IconSelector>,
    ) -> BluesquareResult<RenderedImage> {
        let profile_ref = validate_profile_ref(handle_or_did)?;
        let identity = self.resolver.resolve(&profile_ref)?;
        let payload = self.config.profile_url(&identity.did);
        let icon = IconSpec::select(selector, &identity);
        tracing::info!(%payload, ?icon, "rendering profile code");
        self.render_payload(&payload, &icon)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/pipeline.rs"]
mod tests;
