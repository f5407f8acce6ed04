mod dialogs;
mod icons;
mod preview;
mod sliders;
mod status;
mod top;
