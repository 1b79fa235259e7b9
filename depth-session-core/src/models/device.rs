/// A sensor device reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub uri: String,
    pub name: String,
    pub vendor: String,
    pub usb_vendor_id: Option<u16>,
    pub usb_product_id: Option<u16>,
}

impl DeviceInfo {
    pub fn new(uri: impl Into<String>, name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            vendor: vendor.into(),
            usb_vendor_id: None,
            usb_product_id: None,
        }
    }

    pub fn with_usb_ids(mut self, vendor_id: u16, product_id: u16) -> Self {
        self.usb_vendor_id = Some(vendor_id);
        self.usb_product_id = Some(product_id);
        self
    }

    /// `vvvv:pppp` USB id in hex, when the device is on USB.
    pub fn usb_id(&self) -> Option<String> {
        match (self.usb_vendor_id, self.usb_product_id) {
            (Some(vendor), Some(product)) => Some(format!("{:04x}:{:04x}", vendor, product)),
            _ => None,
        }
    }
}
